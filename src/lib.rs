//! # decodable
//!
//! Typed decoding of loosely-typed, JSON-shaped data into native Rust types,
//! with failures that are values instead of panics.
//!
//! ## How it works
//!
//! Input from any JSON-like source is first normalized into a [`Value`], a
//! closed tree of objects, arrays, strings, numbers, booleans and null. A type
//! then describes how to build itself from a `Value` by implementing
//! [`Decodable`]. Every decode returns a [`Decoded<T>`]: either `Success(T)` or
//! `Failure(DecodeError)`.
//!
//! ## Key Features
//!
//! - **Typed failures**: [`DecodeError`] distinguishes type mismatches, missing
//!   keys, custom failures and aggregated failures
//! - **Field-at-a-time construction**: build structs with [`pure`] and
//!   [`Decoded::apply`], collecting every invalid field in one pass
//! - **Key paths**: decode nested fields with [`Value::decode_at`],
//!   [`Value::decode_optional_at`] and [`Value::decode_lossy_at`]
//! - **All-or-nothing collections**: [`sequence`] never silently drops
//!   elements, and [`cat_decoded`] is the explicit lossy alternative
//! - **Chunked parallel decode**: large arrays can be split across scoped
//!   threads with [`DecodeOptions`], without changing the result
//!
//! ## Quick Start
//!
//! ```rust
//! use decodable::{decode, pure, value, DecodeError, Decodable, Decoded, Value};
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: i32,
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! impl Decodable for User {
//!     fn decode(json: &Value) -> Decoded<Self> {
//!         pure(|id| move |name| move |email| User { id, name, email })
//!             .apply(json.decode_at("id"))
//!             .apply(json.decode_at("name"))
//!             .apply(json.decode_optional_at("email"))
//!     }
//! }
//!
//! let user: Decoded<User> = decode(value!({ "id": 1, "name": "Cool User" }));
//! assert_eq!(
//!     user.into_value(),
//!     Some(User { id: 1, name: "Cool User".to_string(), email: None })
//! );
//!
//! let user: Decoded<User> = decode(value!({ "id": 1, "email": "u@example.com" }));
//! assert_eq!(user.into_error(), Some(DecodeError::missing_key("name")));
//! ```
//!
//! ## Input Sources
//!
//! Anything convertible into a [`Value`] can be decoded directly:
//!
//! - Rust literals and collections through `From` (`Value::from(3)`,
//!   `Value::from(vec!["a", "b"])`)
//! - The [`value!`] macro for inline JSON-like literals
//! - `serde_json::Value`, or any serde data source, since [`Value`]
//!   implements `Deserialize`
//! - JSON text through [`decode_json_str`]
//!
//! ## Three Ways to Consume a Decode
//!
//! | Function | Returns | Use when |
//! |----------|---------|----------|
//! | [`decode`] | `Decoded<T>` | you want every diagnostic |
//! | [`decode_opt`] | `Option<T>` | only presence matters |
//! | [`try_decode`] | `Result<T>` | the caller propagates with `?` |
//!
//! All three derive from the same `Decoded<T>`. Each has a root-key
//! variant ([`decode_root_key`] and friends) that decodes a named top-level
//! field instead of the whole input.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (trace level at the entry points, debug
//! level for chunk scheduling and element failures) and never installs a
//! subscriber.

pub mod decodable;
pub mod decoded;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod path;
pub mod sequence;
pub mod value;

pub use decodable::{decode_from_str, Decodable};
pub use decoded::{materialize, pure, Decoded};
pub use error::{DecodeError, Result};
pub use map::ValueMap;
pub use options::{Aggregation, DecodeOptions, DEFAULT_CHUNK_SIZE};
pub use path::{decoded_path, decoded_value, KeyPath};
pub use sequence::{
    cat_decoded, cat_decoded_map, decode_vec_with_options, sequence, sequence_chunked,
    sequence_map, sequence_with,
};
pub use value::{Number, Value};

/// Decodes a `T` from anything convertible into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use decodable::{decode, DecodeError, Decoded};
///
/// let n: Decoded<i32> = decode(42);
/// assert_eq!(n.into_value(), Some(42));
///
/// let s: Decoded<String> = decode(42);
/// assert_eq!(
///     s.into_error(),
///     Some(DecodeError::type_mismatch("String", "Number(42)"))
/// );
/// ```
pub fn decode<T, V>(input: V) -> Decoded<T>
where
    T: Decodable,
    V: Into<Value>,
{
    let value = input.into();
    tracing::trace!(kind = value.kind(), "decoding root value");
    T::decode(&value)
}

/// Like [`decode`], discarding the error.
///
/// ```rust
/// use decodable::decode_opt;
///
/// assert_eq!(decode_opt::<bool, _>(true), Some(true));
/// assert_eq!(decode_opt::<bool, _>("true"), None);
/// ```
#[must_use]
pub fn decode_opt<T, V>(input: V) -> Option<T>
where
    T: Decodable,
    V: Into<Value>,
{
    decode(input).into_value()
}

/// Like [`decode`], as a `Result` for use with `?`.
///
/// # Errors
///
/// Returns the [`DecodeError`] of the failed decode.
///
/// # Examples
///
/// ```rust
/// use decodable::{try_decode, value};
///
/// fn tags() -> decodable::Result<Vec<String>> {
///     let tags = try_decode(value!(["rust", "json"]))?;
///     Ok(tags)
/// }
///
/// assert_eq!(tags().unwrap(), vec!["rust", "json"]);
/// ```
pub fn try_decode<T, V>(input: V) -> Result<T>
where
    T: Decodable,
    V: Into<Value>,
{
    decode(input).dematerialize()
}

/// Decodes the field at `key` of the input, which is expected to be an object.
///
/// `key` may be a single key or a key path. This is the same as
/// `Value::from(input).decode_at(key)`.
///
/// # Examples
///
/// ```rust
/// use decodable::{decode_root_key, value, DecodeError, Decoded};
///
/// let json = value!({ "user": { "name": "Cool User" } });
///
/// let name: Decoded<String> = decode_root_key(json.clone(), ["user", "name"]);
/// assert_eq!(name.into_value().as_deref(), Some("Cool User"));
///
/// let id: Decoded<i64> = decode_root_key(json, "id");
/// assert_eq!(id.into_error(), Some(DecodeError::missing_key("id")));
/// ```
pub fn decode_root_key<T, V, P>(input: V, key: P) -> Decoded<T>
where
    T: Decodable,
    V: Into<Value>,
    P: KeyPath,
{
    let value = input.into();
    tracing::trace!(kind = value.kind(), "decoding root key");
    value.decode_at(key)
}

/// Like [`decode_root_key`], discarding the error.
#[must_use]
pub fn decode_root_key_opt<T, V, P>(input: V, key: P) -> Option<T>
where
    T: Decodable,
    V: Into<Value>,
    P: KeyPath,
{
    decode_root_key(input, key).into_value()
}

/// Like [`decode_root_key`], as a `Result` for use with `?`.
///
/// # Errors
///
/// Returns the [`DecodeError`] of the failed lookup or decode.
pub fn try_decode_root_key<T, V, P>(input: V, key: P) -> Result<T>
where
    T: Decodable,
    V: Into<Value>,
    P: KeyPath,
{
    decode_root_key(input, key).dematerialize()
}

/// Parses JSON text and decodes the result.
///
/// Text that is not valid JSON fails with a `Custom` error carrying the
/// parser's message.
///
/// # Examples
///
/// ```rust
/// use decodable::{decode_json_str, Decoded};
/// use std::collections::HashMap;
///
/// let scores: Decoded<HashMap<String, u8>> = decode_json_str(r#"{"a": 1, "b": 2}"#);
/// assert_eq!(scores.into_value().map(|m| m["b"]), Some(2));
///
/// let broken: Decoded<HashMap<String, u8>> = decode_json_str("{");
/// assert!(broken.is_failure());
/// ```
pub fn decode_json_str<T: Decodable>(json: &str) -> Decoded<T> {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => {
            tracing::trace!(len = json.len(), "decoding parsed json");
            T::decode(&value)
        }
        Err(err) => {
            tracing::debug!(%err, "input is not valid json");
            Decoded::Failure(err.into())
        }
    }
}
