//! The [`Decodable`] capability and its built-in instances.
//!
//! A type is decodable when it knows how to attempt to build itself from a
//! [`Value`]. There is no receiver: decoding is an associated function, since
//! nothing exists before the decode succeeds.
//!
//! Built-in instances:
//!
//! | Rust type | Accepts | Expected name |
//! |-----------|---------|---------------|
//! | `String` | `String` | `String` |
//! | `char` | one-character `String` | `Char` |
//! | `bool` | `Bool`, or `Number` (non-zero is `true`) | `Bool` |
//! | `i8`..`i32`, `isize` | integral `Number` in range | `Int8`..`Int32`, `Int` |
//! | `u8`..`u32`, `usize` | integral `Number` in range | `UInt8`..`UInt32`, `UInt` |
//! | `i64`, `u64` | integral `Number`, or a decimal `String` | `Int64`, `UInt64` |
//! | `f32`, `f64` | any `Number` | `Float`, `Double` |
//! | `Value` | anything | |
//! | `Option<T>` | `Null` as `None`, otherwise whatever `T` accepts (failures are kept) | |
//! | `Vec<T>` | `Array`, all elements decodable | `Array` |
//! | `IndexMap`/`HashMap`/`BTreeMap<String, T>` | `Object`, all values decodable | `Object` |
//! | `DateTime<Utc>` | RFC 3339 `String` | `DateTime` |
//! | `BigInt`, `BigUint` | integral `Number`, or a decimal `String` | `BigInt`, `BigUint` |
//!
//! ## Implementing Decodable
//!
//! ```rust
//! use decodable::{pure, value, Decodable, Decoded, Value};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: f64,
//!     y: f64,
//! }
//!
//! impl Decodable for Point {
//!     fn decode(value: &Value) -> Decoded<Self> {
//!         pure(|x| move |y| Point { x, y })
//!             .apply(value.decode_at("x"))
//!             .apply(value.decode_at("y"))
//!     }
//! }
//!
//! let point = Point::decode(&value!({ "x": 1, "y": 2.5 }));
//! assert_eq!(point.into_value(), Some(Point { x: 1.0, y: 2.5 }));
//! ```

use crate::{sequence, sequence_map, Decoded, Value};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use num_bigint::{BigInt, BigUint};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::str::FromStr;

/// A type that can attempt to construct itself from a [`Value`].
pub trait Decodable: Sized {
    fn decode(value: &Value) -> Decoded<Self>;
}

/// Decodes a string-backed value through its [`FromStr`] implementation.
///
/// A non-string is a type mismatch against `"String"`; a string that does not
/// parse is a type mismatch against `expected`. Handy for string-valued enums.
///
/// # Examples
///
/// ```rust
/// use decodable::{decode_from_str, DecodeError, Decodable, Decoded, Value};
/// use std::str::FromStr;
///
/// #[derive(Debug, PartialEq)]
/// enum Role { Admin, Guest }
///
/// impl FromStr for Role {
///     type Err = ();
///     fn from_str(s: &str) -> Result<Self, ()> {
///         match s {
///             "admin" => Ok(Role::Admin),
///             "guest" => Ok(Role::Guest),
///             _ => Err(()),
///         }
///     }
/// }
///
/// impl Decodable for Role {
///     fn decode(value: &Value) -> Decoded<Self> {
///         decode_from_str(value, "Role")
///     }
/// }
///
/// assert_eq!(Role::decode(&Value::from("admin")).into_value(), Some(Role::Admin));
/// assert_eq!(
///     Role::decode(&Value::from("root")).into_error(),
///     Some(DecodeError::type_mismatch("Role", "String(root)"))
/// );
/// ```
pub fn decode_from_str<T: FromStr>(value: &Value, expected: &str) -> Decoded<T> {
    match value {
        Value::String(s) => match s.parse() {
            Ok(parsed) => Decoded::Success(parsed),
            Err(_) => Decoded::type_mismatch(expected, value),
        },
        _ => Decoded::type_mismatch("String", value),
    }
}

impl Decodable for Value {
    fn decode(value: &Value) -> Decoded<Self> {
        Decoded::Success(value.clone())
    }
}

impl Decodable for String {
    fn decode(value: &Value) -> Decoded<Self> {
        match value {
            Value::String(s) => Decoded::Success(s.clone()),
            _ => Decoded::type_mismatch("String", value),
        }
    }
}

impl Decodable for char {
    fn decode(value: &Value) -> Decoded<Self> {
        let single = value.as_str().and_then(|s| {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        });
        match single {
            Some(c) => Decoded::Success(c),
            None => Decoded::type_mismatch("Char", value),
        }
    }
}

impl Decodable for bool {
    fn decode(value: &Value) -> Decoded<Self> {
        match value {
            Value::Bool(b) => Decoded::Success(*b),
            Value::Number(n) => Decoded::Success(n.as_bool()),
            _ => Decoded::type_mismatch("Bool", value),
        }
    }
}

macro_rules! decodable_signed {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Decodable for $ty {
                fn decode(value: &Value) -> Decoded<Self> {
                    match value.as_i64().and_then(|i| <$ty>::try_from(i).ok()) {
                        Some(n) => Decoded::Success(n),
                        None => Decoded::type_mismatch($name, value),
                    }
                }
            }
        )*
    };
}

macro_rules! decodable_unsigned {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Decodable for $ty {
                fn decode(value: &Value) -> Decoded<Self> {
                    match value.as_u64().and_then(|u| <$ty>::try_from(u).ok()) {
                        Some(n) => Decoded::Success(n),
                        None => Decoded::type_mismatch($name, value),
                    }
                }
            }
        )*
    };
}

decodable_signed!(i8 => "Int8", i16 => "Int16", i32 => "Int32", isize => "Int");
decodable_unsigned!(u8 => "UInt8", u16 => "UInt16", u32 => "UInt32", usize => "UInt");

// 64-bit integers are often sent as strings to survive float-only parsers.
impl Decodable for i64 {
    fn decode(value: &Value) -> Decoded<Self> {
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };
        match parsed {
            Some(n) => Decoded::Success(n),
            None => Decoded::type_mismatch("Int64", value),
        }
    }
}

impl Decodable for u64 {
    fn decode(value: &Value) -> Decoded<Self> {
        let parsed = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };
        match parsed {
            Some(n) => Decoded::Success(n),
            None => Decoded::type_mismatch("UInt64", value),
        }
    }
}

impl Decodable for f64 {
    fn decode(value: &Value) -> Decoded<Self> {
        match value {
            Value::Number(n) => Decoded::Success(n.as_f64()),
            _ => Decoded::type_mismatch("Double", value),
        }
    }
}

impl Decodable for f32 {
    fn decode(value: &Value) -> Decoded<Self> {
        match value {
            Value::Number(n) => Decoded::Success(n.as_f32()),
            _ => Decoded::type_mismatch("Float", value),
        }
    }
}

impl Decodable for BigInt {
    fn decode(value: &Value) -> Decoded<Self> {
        let parsed = match value {
            Value::Number(n) => n
                .as_i64()
                .map(BigInt::from)
                .or_else(|| n.as_u64().map(BigInt::from)),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };
        match parsed {
            Some(n) => Decoded::Success(n),
            None => Decoded::type_mismatch("BigInt", value),
        }
    }
}

impl Decodable for BigUint {
    fn decode(value: &Value) -> Decoded<Self> {
        let parsed = match value {
            Value::Number(n) => n.as_u64().map(BigUint::from),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };
        match parsed {
            Some(n) => Decoded::Success(n),
            None => Decoded::type_mismatch("BigUint", value),
        }
    }
}

impl Decodable for DateTime<Utc> {
    fn decode(value: &Value) -> Decoded<Self> {
        match value
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        {
            Some(dt) => Decoded::Success(dt.with_timezone(&Utc)),
            None => Decoded::type_mismatch("DateTime", value),
        }
    }
}

/// `Null` decodes to `None`; anything else must decode as `T`. A failure
/// inside a present value, including a missing nested key, is kept.
impl<T: Decodable> Decodable for Option<T> {
    fn decode(value: &Value) -> Decoded<Self> {
        match value {
            Value::Null => Decoded::Success(None),
            _ => T::decode(value).map(Some),
        }
    }
}

impl<T: Decodable> Decodable for Box<T> {
    fn decode(value: &Value) -> Decoded<Self> {
        T::decode(value).map(Box::new)
    }
}

/// All-or-nothing: the first element that fails decides the error.
impl<T: Decodable> Decodable for Vec<T> {
    fn decode(value: &Value) -> Decoded<Self> {
        match value {
            Value::Array(items) => sequence(items.iter().map(T::decode)),
            _ => Decoded::type_mismatch("Array", value),
        }
    }
}

impl<T: Decodable> Decodable for IndexMap<String, T> {
    fn decode(value: &Value) -> Decoded<Self> {
        match value {
            Value::Object(obj) => sequence_map(obj.iter().map(|(k, v)| (k.clone(), T::decode(v)))),
            _ => Decoded::type_mismatch("Object", value),
        }
    }
}

impl<T, S> Decodable for HashMap<String, T, S>
where
    T: Decodable,
    S: BuildHasher + Default,
{
    fn decode(value: &Value) -> Decoded<Self> {
        IndexMap::<String, T>::decode(value).map(|map| map.into_iter().collect())
    }
}

impl<T: Decodable> Decodable for BTreeMap<String, T> {
    fn decode(value: &Value) -> Decoded<Self> {
        IndexMap::<String, T>::decode(value).map(|map| map.into_iter().collect())
    }
}
