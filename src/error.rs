//! Error types describing why a decode failed.
//!
//! Errors are inert data: they can be compared, cloned and printed, and they
//! never carry behaviour. Every combinator in this crate either forwards an
//! error untouched or, when accumulating, merges several of them into
//! [`DecodeError::Multiple`].
//!
//! ## Error Categories
//!
//! - **Type mismatches**: a value was present but had the wrong shape
//! - **Missing keys**: a key path segment was absent from an object (or `null`)
//! - **Custom**: free-form messages raised by user-written decoders
//! - **Multiple**: independent field failures collected by an accumulating decode
//!
//! ## Rendering
//!
//! The `Display` output is stable and suitable for assertions:
//!
//! ```rust
//! use decodable::DecodeError;
//!
//! let err = DecodeError::type_mismatch("String", "Number(3)");
//! assert_eq!(err.to_string(), "TypeMismatch(Expected String, got Number(3))");
//!
//! let err = DecodeError::missing_key("email");
//! assert_eq!(err.to_string(), "MissingKey(email)");
//! ```

use std::fmt;
use thiserror::Error;

/// All the reasons a decode can fail.
///
/// Equality is structural: two `TypeMismatch` errors are equal only when both
/// their expected and actual descriptions match, and `Multiple` errors compare
/// their ordered lists element by element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum DecodeError {
    /// The value existed but had the wrong shape.
    #[error("TypeMismatch(Expected {expected}, got {actual})")]
    TypeMismatch { expected: String, actual: String },

    /// A key path segment was absent from an object.
    #[error("MissingKey({0})")]
    MissingKey(String),

    /// Escape hatch for user-defined decoders.
    #[error("Custom({0})")]
    Custom(String),

    /// Independent failures gathered while decoding a composite value.
    #[error("Multiple([{}])", join(.0))]
    Multiple(Vec<DecodeError>),
}

fn join(errors: &[DecodeError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl DecodeError {
    /// Creates a type mismatch from anything printable.
    ///
    /// The `actual` side is usually a [`Value`](crate::Value), whose `Display`
    /// renders as `Kind(payload)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::{DecodeError, Value};
    ///
    /// let err = DecodeError::type_mismatch("Int", Value::from("1"));
    /// assert_eq!(err.to_string(), "TypeMismatch(Expected Int, got String(1))");
    /// ```
    pub fn type_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: fmt::Display,
        A: fmt::Display,
    {
        DecodeError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Creates a missing key error.
    pub fn missing_key(key: &str) -> Self {
        DecodeError::MissingKey(key.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::DecodeError;
    ///
    /// let err = DecodeError::custom("negative age");
    /// assert_eq!(err.to_string(), "Custom(negative age)");
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        DecodeError::Custom(msg.to_string())
    }

    /// Returns `true` for [`DecodeError::MissingKey`].
    #[inline]
    #[must_use]
    pub const fn is_missing_key(&self) -> bool {
        matches!(self, DecodeError::MissingKey(_))
    }

    /// Merges two errors into a flat [`DecodeError::Multiple`].
    ///
    /// Existing `Multiple` lists are spliced rather than nested, so the result
    /// always lists leaf errors in the order they were produced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::DecodeError;
    ///
    /// let merged = DecodeError::missing_key("a")
    ///     .combine(DecodeError::missing_key("b"))
    ///     .combine(DecodeError::custom("c"));
    ///
    /// assert_eq!(
    ///     merged,
    ///     DecodeError::Multiple(vec![
    ///         DecodeError::missing_key("a"),
    ///         DecodeError::missing_key("b"),
    ///         DecodeError::custom("c"),
    ///     ])
    /// );
    /// ```
    #[must_use]
    pub fn combine(self, other: DecodeError) -> Self {
        match (self, other) {
            (DecodeError::Multiple(mut lhs), DecodeError::Multiple(rhs)) => {
                lhs.extend(rhs);
                DecodeError::Multiple(lhs)
            }
            (DecodeError::Multiple(mut lhs), rhs) => {
                lhs.push(rhs);
                DecodeError::Multiple(lhs)
            }
            (lhs, DecodeError::Multiple(rhs)) => {
                let mut errors = Vec::with_capacity(rhs.len() + 1);
                errors.push(lhs);
                errors.extend(rhs);
                DecodeError::Multiple(errors)
            }
            (lhs, rhs) => DecodeError::Multiple(vec![lhs, rhs]),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Custom(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendering() {
        assert_eq!(
            DecodeError::type_mismatch("String", "Number(3)").to_string(),
            "TypeMismatch(Expected String, got Number(3))"
        );
        assert_eq!(
            DecodeError::missing_key("email").to_string(),
            "MissingKey(email)"
        );
        assert_eq!(
            DecodeError::custom("message text").to_string(),
            "Custom(message text)"
        );
        assert_eq!(
            DecodeError::Multiple(vec![
                DecodeError::missing_key("id"),
                DecodeError::custom("bad"),
            ])
            .to_string(),
            "Multiple([MissingKey(id), Custom(bad)])"
        );
    }

    #[test]
    fn test_equality_uses_all_data() {
        assert_eq!(
            DecodeError::type_mismatch("Int", "Null"),
            DecodeError::type_mismatch("Int", "Null")
        );
        assert_ne!(
            DecodeError::type_mismatch("Int", "Null"),
            DecodeError::type_mismatch("Int", "Bool(true)")
        );
        assert_ne!(
            DecodeError::Multiple(vec![
                DecodeError::missing_key("a"),
                DecodeError::missing_key("b")
            ]),
            DecodeError::Multiple(vec![
                DecodeError::missing_key("b"),
                DecodeError::missing_key("a")
            ])
        );
    }

    #[test]
    fn test_combine_flattens() {
        let left = DecodeError::Multiple(vec![DecodeError::missing_key("a")]);
        let right = DecodeError::Multiple(vec![
            DecodeError::missing_key("b"),
            DecodeError::missing_key("c"),
        ]);
        assert_eq!(
            left.combine(right),
            DecodeError::Multiple(vec![
                DecodeError::missing_key("a"),
                DecodeError::missing_key("b"),
                DecodeError::missing_key("c"),
            ])
        );

        let prefixed = DecodeError::custom("x").combine(DecodeError::Multiple(vec![
            DecodeError::missing_key("y"),
        ]));
        assert_eq!(
            prefixed,
            DecodeError::Multiple(vec![
                DecodeError::custom("x"),
                DecodeError::missing_key("y")
            ])
        );
    }
}
