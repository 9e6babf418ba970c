use chrono::{TimeZone, Utc};
use decodable::{
    decode, decode_json_str, decode_opt, decode_root_key, materialize, pure, try_decode,
    try_decode_root_key, value, Aggregation, DecodeError, Decodable, Decoded, Value,
};
use num_bigint::BigInt;
use std::collections::HashMap;

#[derive(Debug, PartialEq)]
struct User {
    id: i32,
    name: String,
    email: Option<String>,
}

impl Decodable for User {
    fn decode(json: &Value) -> Decoded<Self> {
        pure(|id| move |name| move |email| User { id, name, email })
            .apply(json.decode_at("id"))
            .apply(json.decode_at("name"))
            .apply(json.decode_optional_at("email"))
    }
}

#[derive(Debug, PartialEq)]
struct Repository {
    id: i64,
    name: String,
    owner: User,
    stars: u32,
    tags: Vec<String>,
}

impl Decodable for Repository {
    fn decode(json: &Value) -> Decoded<Self> {
        pure(|id| move |name| move |owner| move |stars| move |tags| Repository {
            id,
            name,
            owner,
            stars,
            tags,
        })
        .apply(json.decode_at("id"))
        .apply(json.decode_at("name"))
        .apply(json.decode_at("owner"))
        .apply(json.decode_at(["meta", "stars"]))
        .apply(json.decode_lossy_at("tags"))
    }
}

/// Same fields as `User`, but stops at the first invalid one.
#[derive(Debug, PartialEq)]
struct StrictUser {
    id: i32,
    name: String,
}

impl Decodable for StrictUser {
    fn decode(json: &Value) -> Decoded<Self> {
        pure(|id| move |name| StrictUser { id, name })
            .apply_with(json.decode_at("id"), Aggregation::ShortCircuit)
            .apply_with(json.decode_at("name"), Aggregation::ShortCircuit)
    }
}

#[test]
fn test_user_with_email() {
    let json = value!({ "id": 1, "name": "Cool User", "email": "u@example.com" });
    let user: Decoded<User> = decode(json);

    assert_eq!(
        user,
        Decoded::Success(User {
            id: 1,
            name: "Cool User".to_string(),
            email: Some("u@example.com".to_string()),
        })
    );
}

#[test]
fn test_user_without_email() {
    let json = value!({ "id": 1, "name": "Cool User" });
    let user: Decoded<User> = decode(json);

    assert_eq!(
        user,
        Decoded::Success(User {
            id: 1,
            name: "Cool User".to_string(),
            email: None,
        })
    );
}

#[test]
fn test_user_with_null_email() {
    let json = value!({ "id": 1, "name": "Cool User", "email": null });
    let user: Decoded<User> = decode(json);
    assert_eq!(user.into_value().map(|u| u.email), Some(None));
}

#[test]
fn test_user_with_string_id() {
    let json = value!({ "id": "1", "name": "Cool User" });
    let user: Decoded<User> = decode(json);

    assert_eq!(
        user.into_error(),
        Some(DecodeError::type_mismatch("Int32", "String(1)"))
    );
}

#[test]
fn test_optional_field_with_wrong_type_is_a_failure() {
    let json = value!({ "id": 1, "name": "Cool User", "email": 7 });
    let user: Decoded<User> = decode(json);

    assert_eq!(
        user.into_error(),
        Some(DecodeError::type_mismatch("String", "Number(7)"))
    );
}

#[test]
fn test_every_invalid_field_is_reported() {
    let json = value!({ "id": "1", "email": false });
    let user: Decoded<User> = decode(json);

    let error = user.into_error().unwrap();
    assert_eq!(
        error,
        DecodeError::Multiple(vec![
            DecodeError::type_mismatch("Int32", "String(1)"),
            DecodeError::missing_key("name"),
            DecodeError::type_mismatch("String", "Bool(false)"),
        ])
    );
    assert_eq!(
        error.to_string(),
        "Multiple([TypeMismatch(Expected Int32, got String(1)), MissingKey(name), \
         TypeMismatch(Expected String, got Bool(false))])"
    );
}

#[test]
fn test_short_circuit_reports_first_field_only() {
    let json = value!({ "id": "1" });
    let user: Decoded<StrictUser> = decode(json);

    assert_eq!(
        user.into_error(),
        Some(DecodeError::type_mismatch("Int32", "String(1)"))
    );
}

#[test]
fn test_string_array() {
    let ok: Decoded<Vec<String>> = decode(value!(["foo", "bar", "baz"]));
    assert_eq!(
        ok.into_value(),
        Some(vec!["foo".to_string(), "bar".to_string(), "baz".to_string()])
    );

    let bad: Decoded<Vec<String>> = decode(value!(["foo", 2, "baz"]));
    assert_eq!(
        bad.into_error(),
        Some(DecodeError::type_mismatch("String", "Number(2)"))
    );
}

#[test]
fn test_array_of_objects_fails_at_first_bad_element() {
    let json = value!([
        { "id": 1, "name": "a" },
        { "id": 2 },
        { "name": "c" }
    ]);
    let users: Decoded<Vec<User>> = decode(json);
    assert_eq!(users.into_error(), Some(DecodeError::missing_key("name")));
}

#[test]
fn test_nested_struct() {
    let json = value!({
        "id": 9000000000i64,
        "name": "decodable",
        "owner": { "id": 1, "name": "Cool User" },
        "meta": { "stars": 42 },
        "tags": ["rust", 3, "json"]
    });
    let repo: Decoded<Repository> = decode(json);

    assert_eq!(
        repo.into_value(),
        Some(Repository {
            id: 9_000_000_000,
            name: "decodable".to_string(),
            owner: User {
                id: 1,
                name: "Cool User".to_string(),
                email: None,
            },
            stars: 42,
            tags: vec!["rust".to_string(), "json".to_string()],
        })
    );
}

#[test]
fn test_nested_struct_failures_are_flattened() {
    let json = value!({
        "id": 1,
        "name": "decodable",
        "owner": { "id": "x" },
        "meta": {}
    });
    let repo: Decoded<Repository> = decode(json);

    assert_eq!(
        repo.into_error(),
        Some(DecodeError::Multiple(vec![
            DecodeError::type_mismatch("Int32", "String(x)"),
            DecodeError::missing_key("name"),
            DecodeError::missing_key("stars"),
        ]))
    );
}

#[test]
fn test_key_path_stops_at_first_missing_segment() {
    let json = value!({ "a": { "x": { "c": 1 } } });
    let c: Decoded<i32> = json.decode_at(["a", "b", "c"]);
    assert_eq!(c.into_error(), Some(DecodeError::missing_key("b")));
}

#[test]
fn test_alternate_locations() {
    let json = value!({ "username": "legacy" });
    let name: Decoded<String> = json
        .decode_at("name")
        .or(json.decode_at("username"));
    assert_eq!(name.into_value().as_deref(), Some("legacy"));

    let neither: Decoded<String> = json.decode_at("name").or(json.decode_at("login"));
    assert_eq!(neither.into_error(), Some(DecodeError::missing_key("login")));
}

#[test]
fn test_root_key_entry_points() {
    let json = value!({ "user": { "id": 5, "name": "Root" } });

    let user: Decoded<User> = decode_root_key(json.clone(), "user");
    assert_eq!(user.into_value().map(|u| u.id), Some(5));

    let missing: decodable::Result<User> = try_decode_root_key(json, "admin");
    assert_eq!(missing, Err(DecodeError::missing_key("admin")));
}

#[test]
fn test_three_ways_to_consume() {
    assert_eq!(decode_opt::<u8, _>(300), None);
    assert_eq!(decode_opt::<u16, _>(300), Some(300));

    let err = try_decode::<u8, _>(300).unwrap_err();
    assert_eq!(err, DecodeError::type_mismatch("UInt8", "Number(300)"));

    let decoded: Decoded<u8> = decode(300);
    assert_eq!(decoded.dematerialize(), Err(err));
}

#[test]
fn test_question_mark_propagation() {
    fn user_name(json: Value) -> decodable::Result<String> {
        let user: User = try_decode(json)?;
        Ok(user.name)
    }

    assert_eq!(
        user_name(value!({ "id": 1, "name": "n" })),
        Ok("n".to_string())
    );
    assert_eq!(
        user_name(value!({ "id": 1 })),
        Err(DecodeError::missing_key("name"))
    );
}

#[test]
fn test_serde_json_input() {
    let json = serde_json::json!({
        "id": 1,
        "name": "Cool User",
        "email": "u@example.com"
    });
    let user: Decoded<User> = decode(json);
    assert_eq!(user.into_value().and_then(|u| u.email).as_deref(), Some("u@example.com"));
}

#[test]
fn test_json_text_input() {
    let user: Decoded<User> = decode_json_str(r#"{"id": 1, "name": "Cool User"}"#);
    assert!(user.is_success());

    let user: Decoded<User> = decode_json_str(r#"{"id": 1, "name": "#);
    assert!(matches!(user.into_error(), Some(DecodeError::Custom(_))));
}

#[test]
fn test_large_integers_as_strings() {
    let json = value!({ "i": "-9223372036854775808", "u": "18446744073709551615", "n": "12x" });

    assert_eq!(json.decode_at::<i64, _>("i").into_value(), Some(i64::MIN));
    assert_eq!(json.decode_at::<u64, _>("u").into_value(), Some(u64::MAX));
    assert_eq!(
        json.decode_at::<i64, _>("n").into_error(),
        Some(DecodeError::type_mismatch("Int64", "String(12x)"))
    );
}

#[test]
fn test_big_integers_and_dates() {
    let json = value!({
        "big": "123456789012345678901234567890",
        "created": "2024-01-02T03:04:05Z"
    });

    let big: Decoded<BigInt> = json.decode_at("big");
    assert_eq!(
        big.into_value().map(|b| b.to_string()).as_deref(),
        Some("123456789012345678901234567890")
    );

    let created: Decoded<chrono::DateTime<Utc>> = json.decode_at("created");
    assert_eq!(
        created.into_value(),
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single()
    );
}

#[test]
fn test_maps() {
    let json = value!({ "a": 1, "b": 2 });
    let scores: Decoded<HashMap<String, u32>> = decode(json);
    let scores = scores.into_value().unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores["b"], 2);

    let bad: Decoded<HashMap<String, u32>> = decode(value!({ "a": 1, "b": "two" }));
    assert_eq!(
        bad.into_error(),
        Some(DecodeError::type_mismatch("UInt32", "String(two)"))
    );
}

#[test]
fn test_materialize_custom_validation() {
    let json = value!({ "port": "8080" });
    let port: Decoded<u16> = json
        .decode_at::<String, _>("port")
        .and_then(|s| materialize(|| s.parse::<u16>()));
    assert_eq!(port.into_value(), Some(8080));

    let json = value!({ "port": "http" });
    let port: Decoded<u16> = json
        .decode_at::<String, _>("port")
        .and_then(|s| materialize(|| s.parse::<u16>()));
    assert!(matches!(port.into_error(), Some(DecodeError::Custom(_))));
}
