//! Key path traversal through nested objects.
//!
//! A key path is an ordered list of object keys. Traversal folds a single-key
//! lookup left to right and stops at the first step that fails, so
//! `["a", "b"]` means "look up `a`, then look up `b` inside what was found".
//!
//! A single step fails with:
//!
//! - `MissingKey(key)` when the object has no such key, or maps it to `null`
//! - `TypeMismatch("Object", actual)` when the current value is not an object
//!
//! ```rust
//! use decodable::{decoded_path, value, DecodeError, Value};
//!
//! let json = value!({ "a": { "b": { "c": 1 } } });
//! assert_eq!(decoded_path(&json, ["a", "b", "c"]).into_value(), Some(&Value::from(1)));
//!
//! let json = value!({ "a": { "x": 1 } });
//! assert_eq!(
//!     decoded_path(&json, ["a", "b", "c"]).into_error(),
//!     Some(DecodeError::missing_key("b"))
//! );
//! ```

use crate::{cat_decoded, Decodable, Decoded, Value};

/// Something that names a location inside an object tree.
///
/// Implemented for single keys (`&str`, `String`) and for ordered lists of
/// keys (arrays, slices and vectors of either).
pub trait KeyPath {
    fn segments(&self) -> Vec<&str>;
}

impl KeyPath for &str {
    fn segments(&self) -> Vec<&str> {
        vec![*self]
    }
}

impl KeyPath for String {
    fn segments(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

impl KeyPath for &String {
    fn segments(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

impl<const N: usize> KeyPath for [&str; N] {
    fn segments(&self) -> Vec<&str> {
        self.to_vec()
    }
}

impl KeyPath for &[&str] {
    fn segments(&self) -> Vec<&str> {
        self.to_vec()
    }
}

impl KeyPath for Vec<&str> {
    fn segments(&self) -> Vec<&str> {
        self.clone()
    }
}

impl KeyPath for Vec<String> {
    fn segments(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }
}

impl KeyPath for &[String] {
    fn segments(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }
}

/// Looks up a single key, distinguishing "absent" from "not an object".
pub fn decoded_value<'v>(value: &'v Value, key: &str) -> Decoded<&'v Value> {
    match value {
        Value::Object(obj) => match obj.get(key) {
            None | Some(Value::Null) => Decoded::missing_key(key),
            Some(found) => Decoded::Success(found),
        },
        _ => Decoded::type_mismatch("Object", value),
    }
}

/// Walks a key path, failing at the first missing or non-object step.
///
/// An empty path yields the root itself.
pub fn decoded_path<'v, P: KeyPath>(value: &'v Value, path: P) -> Decoded<&'v Value> {
    path.segments()
        .into_iter()
        .fold(Decoded::Success(value), |found, key| {
            found.and_then(|current| decoded_value(current, key))
        })
}

impl Value {
    /// Decodes a required field at `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::{value, DecodeError, Decoded};
    ///
    /// let json = value!({ "user": { "name": "Cool User" } });
    ///
    /// let name: Decoded<String> = json.decode_at(["user", "name"]);
    /// assert_eq!(name.into_value().as_deref(), Some("Cool User"));
    ///
    /// let email: Decoded<String> = json.decode_at(["user", "email"]);
    /// assert_eq!(email.into_error(), Some(DecodeError::missing_key("email")));
    /// ```
    pub fn decode_at<T: Decodable, P: KeyPath>(&self, path: P) -> Decoded<T> {
        decoded_path(self, path).and_then(T::decode)
    }

    /// Decodes an optional field at `path`.
    ///
    /// Only an absent (or `null`) key along the path yields `Success(None)`.
    /// A value that is present but fails to decode, or a path step that runs
    /// into a non-object, is still a failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::{value, Decoded};
    ///
    /// let json = value!({ "id": 1, "email": 5 });
    ///
    /// let phone: Decoded<Option<String>> = json.decode_optional_at("phone");
    /// assert_eq!(phone, Decoded::Success(None));
    ///
    /// let email: Decoded<Option<String>> = json.decode_optional_at("email");
    /// assert!(email.is_failure());
    /// ```
    pub fn decode_optional_at<T: Decodable, P: KeyPath>(&self, path: P) -> Decoded<Option<T>> {
        decoded_path(self, path)
            .optional()
            .and_then(|found| match found {
                Some(value) => T::decode(value).map(Some),
                None => Decoded::Success(None),
            })
    }

    /// Decodes the array at `path`, silently dropping elements that fail.
    ///
    /// An absent key yields an empty list; a present non-array is a failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::{value, Decoded};
    ///
    /// let json = value!({ "scores": [1, "two", 3] });
    /// let scores: Decoded<Vec<i32>> = json.decode_lossy_at("scores");
    /// assert_eq!(scores.into_value(), Some(vec![1, 3]));
    /// ```
    pub fn decode_lossy_at<T: Decodable, P: KeyPath>(&self, path: P) -> Decoded<Vec<T>> {
        decoded_path(self, path)
            .optional()
            .and_then(|found| match found {
                Some(Value::Array(items)) => Decoded::Success(cat_decoded(items.iter().map(T::decode))),
                Some(other) => Decoded::type_mismatch("Array", other),
                None => Decoded::Success(Vec::new()),
            })
    }
}
