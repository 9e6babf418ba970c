//! The result type of every decode, and the combinators that compose them.
//!
//! A [`Decoded<T>`] is either a `Success` carrying a `T` or a `Failure`
//! carrying a [`DecodeError`]. It is never mutated; combinators always build
//! new values.
//!
//! ## Composition
//!
//! - [`Decoded::map`] transforms a success and passes failures through
//! - [`Decoded::and_then`] sequences a decode that may itself fail; this is
//!   what key path traversal uses (look up a key, then decode what was found)
//! - [`Decoded::apply`] feeds a decoded argument into a decoded function,
//!   which lets a multi-field struct be built one field at a time
//! - [`Decoded::optional`] turns `MissingKey` into `Success(None)` and keeps
//!   every other failure
//! - [`Decoded::or`] falls back to an alternative when `self` failed
//!
//! ## Applicative Decoding
//!
//! Start from [`pure`] with a curried constructor and apply one field at a
//! time. With [`Aggregation::Accumulate`] (the policy of [`Decoded::apply`])
//! every field is evaluated and every failure is reported:
//!
//! ```rust
//! use decodable::{pure, value, DecodeError, Decoded, Value};
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: i32,
//!     name: String,
//! }
//!
//! fn decode_user(json: &Value) -> Decoded<User> {
//!     pure(|id| move |name| User { id, name })
//!         .apply(json.decode_at("id"))
//!         .apply(json.decode_at("name"))
//! }
//!
//! let ok = decode_user(&value!({ "id": 1, "name": "Cool User" }));
//! assert_eq!(ok.into_value(), Some(User { id: 1, name: "Cool User".to_string() }));
//!
//! let bad = decode_user(&value!({ "id": "1" }));
//! assert_eq!(
//!     bad.into_error(),
//!     Some(DecodeError::Multiple(vec![
//!         DecodeError::type_mismatch("Int32", "String(1)"),
//!         DecodeError::missing_key("name"),
//!     ]))
//! );
//! ```

use crate::{Aggregation, DecodeError};
use std::fmt;

/// The outcome of attempting to produce a `T` from a [`Value`](crate::Value).
#[must_use = "a decode result may hold a failure that should be inspected"]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Decoded<T> {
    Success(T),
    Failure(DecodeError),
}

/// Lifts a plain value into `Success`.
///
/// This is the starting point of an applicative decode and the identity of
/// [`Decoded::apply`].
#[inline]
pub fn pure<T>(value: T) -> Decoded<T> {
    Decoded::Success(value)
}

/// Runs a fallible producer and captures its error as a `Custom` failure.
///
/// # Examples
///
/// ```rust
/// use decodable::{materialize, DecodeError};
///
/// let parsed = materialize(|| "12".parse::<u8>());
/// assert_eq!(parsed.into_value(), Some(12));
///
/// let failed = materialize(|| "x".parse::<u8>());
/// assert_eq!(
///     failed.into_error(),
///     Some(DecodeError::custom("invalid digit found in string"))
/// );
/// ```
pub fn materialize<T, E, F>(f: F) -> Decoded<T>
where
    E: fmt::Display,
    F: FnOnce() -> Result<T, E>,
{
    match f() {
        Ok(value) => Decoded::Success(value),
        Err(err) => Decoded::Failure(DecodeError::custom(err)),
    }
}

impl<T> Decoded<T> {
    #[inline]
    pub fn failure(error: DecodeError) -> Self {
        Decoded::Failure(error)
    }

    /// Shorthand for a `TypeMismatch` failure.
    pub fn type_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: fmt::Display,
        A: fmt::Display,
    {
        Decoded::Failure(DecodeError::type_mismatch(expected, actual))
    }

    pub fn missing_key(key: &str) -> Self {
        Decoded::Failure(DecodeError::missing_key(key))
    }

    pub fn custom<M: fmt::Display>(message: M) -> Self {
        Decoded::Failure(DecodeError::custom(message))
    }

    /// Converts an `Option` into a decode, reporting `None` as a type mismatch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::{DecodeError, Decoded};
    ///
    /// assert_eq!(Decoded::from_option(Some(3), "Int").into_value(), Some(3));
    /// assert_eq!(
    ///     Decoded::<i32>::from_option(None, "Int").into_error(),
    ///     Some(DecodeError::type_mismatch("Int", "None"))
    /// );
    /// ```
    pub fn from_option(value: Option<T>, expected: &str) -> Self {
        match value {
            Some(value) => Decoded::Success(value),
            None => Decoded::type_mismatch(expected, "None"),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Decoded::Success(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Decoded::Failure(_))
    }

    /// The success payload, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Decoded::Success(value) => Some(value),
            Decoded::Failure(_) => None,
        }
    }

    /// The failure payload, if any.
    #[must_use]
    pub fn error(&self) -> Option<&DecodeError> {
        match self {
            Decoded::Success(_) => None,
            Decoded::Failure(error) => Some(error),
        }
    }

    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Decoded::Success(value) => Some(value),
            Decoded::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn into_error(self) -> Option<DecodeError> {
        match self {
            Decoded::Success(_) => None,
            Decoded::Failure(error) => Some(error),
        }
    }

    pub fn as_ref(&self) -> Decoded<&T> {
        match self {
            Decoded::Success(value) => Decoded::Success(value),
            Decoded::Failure(error) => Decoded::Failure(error.clone()),
        }
    }

    /// Transforms the success payload; failures pass through untouched.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Decoded<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Decoded::Success(value) => Decoded::Success(f(value)),
            Decoded::Failure(error) => Decoded::Failure(error),
        }
    }

    pub fn map_error<F>(self, f: F) -> Decoded<T>
    where
        F: FnOnce(DecodeError) -> DecodeError,
    {
        match self {
            Decoded::Success(value) => Decoded::Success(value),
            Decoded::Failure(error) => Decoded::Failure(f(error)),
        }
    }

    /// Feeds the success payload into a decode that may itself fail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::{Decoded, DecodeError};
    ///
    /// let positive = |n: i64| {
    ///     if n > 0 { Decoded::Success(n) } else { Decoded::custom("not positive") }
    /// };
    ///
    /// assert_eq!(Decoded::Success(4).and_then(positive).into_value(), Some(4));
    /// assert_eq!(
    ///     Decoded::Success(-4).and_then(positive).into_error(),
    ///     Some(DecodeError::custom("not positive"))
    /// );
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Decoded<U>
    where
        F: FnOnce(T) -> Decoded<U>,
    {
        match self {
            Decoded::Success(value) => f(value),
            Decoded::Failure(error) => Decoded::Failure(error),
        }
    }

    /// Returns `self` if it succeeded, otherwise `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::{value, Decoded};
    ///
    /// let json = value!({ "login": "cool" });
    /// let name: Decoded<String> = json.decode_at("username").or(json.decode_at("login"));
    /// assert_eq!(name.into_value().as_deref(), Some("cool"));
    /// ```
    pub fn or(self, other: Decoded<T>) -> Decoded<T> {
        match self {
            Decoded::Success(_) => self,
            Decoded::Failure(_) => other,
        }
    }

    /// Like [`Decoded::or`], but only evaluates the alternative on failure.
    pub fn or_else<F>(self, f: F) -> Decoded<T>
    where
        F: FnOnce(DecodeError) -> Decoded<T>,
    {
        match self {
            Decoded::Success(_) => self,
            Decoded::Failure(error) => f(error),
        }
    }

    /// Treats a missing key as an absent optional field.
    ///
    /// `MissingKey` becomes `Success(None)`. Every other failure is kept: a
    /// key that is present with the wrong shape is still an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::{DecodeError, Decoded};
    ///
    /// let absent: Decoded<String> = Decoded::missing_key("email");
    /// assert_eq!(absent.optional(), Decoded::Success(None));
    ///
    /// let wrong: Decoded<String> = Decoded::type_mismatch("String", "Number(1)");
    /// assert_eq!(
    ///     wrong.optional(),
    ///     Decoded::Failure(DecodeError::type_mismatch("String", "Number(1)"))
    /// );
    /// ```
    pub fn optional(self) -> Decoded<Option<T>> {
        match self {
            Decoded::Success(value) => Decoded::Success(Some(value)),
            Decoded::Failure(DecodeError::MissingKey(_)) => Decoded::Success(None),
            Decoded::Failure(error) => Decoded::Failure(error),
        }
    }

    /// Moves into `Result` land for callers that prefer `?`.
    ///
    /// # Errors
    ///
    /// Returns the failure's [`DecodeError`].
    pub fn dematerialize(self) -> crate::Result<T> {
        match self {
            Decoded::Success(value) => Ok(value),
            Decoded::Failure(error) => Err(error),
        }
    }

    #[must_use]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Decoded::Success(value) => value,
            Decoded::Failure(_) => default,
        }
    }

    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(DecodeError) -> T,
    {
        match self {
            Decoded::Success(value) => value,
            Decoded::Failure(error) => f(error),
        }
    }

    /// Pairs two independent decodes.
    ///
    /// When both fail, `aggregation` decides whether only the first error or
    /// both (as `Multiple`) are reported.
    pub fn zip<U>(self, other: Decoded<U>, aggregation: Aggregation) -> Decoded<(T, U)> {
        match (self, other) {
            (Decoded::Success(t), Decoded::Success(u)) => Decoded::Success((t, u)),
            (Decoded::Failure(error), Decoded::Success(_))
            | (Decoded::Success(_), Decoded::Failure(error)) => Decoded::Failure(error),
            (Decoded::Failure(earlier), Decoded::Failure(later)) => {
                Decoded::Failure(aggregation.merge(earlier, later))
            }
        }
    }
}

impl<F> Decoded<F> {
    /// Applies a decoded function to a decoded argument, accumulating errors.
    ///
    /// If both sides failed, the errors are merged into
    /// [`DecodeError::Multiple`] in left-to-right order, so a chain of
    /// `apply` calls reports every invalid field at once.
    pub fn apply<T, U>(self, arg: Decoded<T>) -> Decoded<U>
    where
        F: FnOnce(T) -> U,
    {
        self.apply_with(arg, Aggregation::Accumulate)
    }

    /// Applies a decoded function to a decoded argument under an explicit
    /// failure policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use decodable::{pure, Aggregation, DecodeError, Decoded};
    ///
    /// let add = pure(|a: i32| move |b: i32| a + b);
    /// let result = add
    ///     .apply_with(Decoded::missing_key("a"), Aggregation::ShortCircuit)
    ///     .apply_with(Decoded::<i32>::missing_key("b"), Aggregation::ShortCircuit);
    ///
    /// assert_eq!(result.into_error(), Some(DecodeError::missing_key("a")));
    /// ```
    pub fn apply_with<T, U>(self, arg: Decoded<T>, aggregation: Aggregation) -> Decoded<U>
    where
        F: FnOnce(T) -> U,
    {
        self.zip(arg, aggregation).map(|(f, value)| f(value))
    }
}

impl<T: fmt::Debug> fmt::Display for Decoded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Success(value) => write!(f, "Success({:?})", value),
            Decoded::Failure(error) => write!(f, "Failure({})", error),
        }
    }
}

impl<T> From<Decoded<T>> for Result<T, DecodeError> {
    fn from(decoded: Decoded<T>) -> Self {
        decoded.dematerialize()
    }
}

impl<T> From<Result<T, DecodeError>> for Decoded<T> {
    fn from(result: Result<T, DecodeError>) -> Self {
        match result {
            Ok(value) => Decoded::Success(value),
            Err(error) => Decoded::Failure(error),
        }
    }
}

/// Collects decodes all-or-nothing, stopping at the first failure.
impl<T, C> FromIterator<Decoded<T>> for Decoded<C>
where
    C: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Decoded<T>>>(iter: I) -> Self {
        iter.into_iter()
            .map(Result::from)
            .collect::<Result<C, DecodeError>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_passes_failure_through() {
        let ok: Decoded<i32> = pure(2);
        assert_eq!(ok.map(|n| n * 10), Decoded::Success(20));

        let err: Decoded<i32> = Decoded::missing_key("n");
        assert_eq!(err.map(|n| n * 10), Decoded::missing_key("n"));
    }

    #[test]
    fn test_and_then_short_circuits() {
        let mut called = false;
        let err: Decoded<i32> = Decoded::custom("boom");
        let out = err.and_then(|n| {
            called = true;
            pure(n)
        });
        assert!(!called);
        assert_eq!(out.into_error(), Some(DecodeError::custom("boom")));
    }

    #[test]
    fn test_apply_accumulates_in_order() {
        let build = pure(|a: i32| move |b: i32| move |c: i32| a + b + c);
        let result = build
            .apply(Decoded::missing_key("a"))
            .apply(pure(2))
            .apply(Decoded::type_mismatch("Int", "Null"));

        assert_eq!(
            result.into_error(),
            Some(DecodeError::Multiple(vec![
                DecodeError::missing_key("a"),
                DecodeError::type_mismatch("Int", "Null"),
            ]))
        );
    }

    #[test]
    fn test_apply_single_failure_is_not_wrapped() {
        let build = pure(|a: i32| move |b: i32| a + b);
        let result = build.apply(pure(1)).apply(Decoded::missing_key("b"));
        assert_eq!(result.into_error(), Some(DecodeError::missing_key("b")));
    }

    #[test]
    fn test_apply_success() {
        let build = pure(|a: i32| move |b: &'static str| format!("{}{}", a, b));
        assert_eq!(
            build.apply(pure(1)).apply(pure("x")).into_value(),
            Some("1x".to_string())
        );
    }

    #[test]
    fn test_pure_is_identity_for_apply() {
        let value: Decoded<i32> = pure(7);
        assert_eq!(pure(|x: i32| x).apply(value.clone()), value);
    }

    #[test]
    fn test_optional_only_absorbs_missing_key() {
        assert_eq!(pure(1).optional(), Decoded::Success(Some(1)));
        assert_eq!(
            Decoded::<i32>::missing_key("x").optional(),
            Decoded::Success(None)
        );
        assert!(Decoded::<i32>::custom("bad").optional().is_failure());
        assert!(Decoded::<i32>::failure(DecodeError::Multiple(vec![
            DecodeError::missing_key("a")
        ]))
        .optional()
        .is_failure());
    }

    #[test]
    fn test_or_alternatives() {
        let first: Decoded<i32> = Decoded::missing_key("a");
        assert_eq!(first.or(pure(2)), pure(2));
        assert_eq!(pure(1).or(pure(2)), pure(1));

        let lazy: Decoded<i32> = pure(1).or_else(|_| panic!("must not run"));
        assert_eq!(lazy, pure(1));
    }

    #[test]
    fn test_dematerialize_and_materialize() {
        assert_eq!(pure(5).dematerialize(), Ok(5));
        assert_eq!(
            Decoded::<i32>::missing_key("k").dematerialize(),
            Err(DecodeError::missing_key("k"))
        );

        let ok = materialize(|| Ok::<_, String>(3));
        assert_eq!(ok, pure(3));
        let err = materialize(|| Err::<i32, _>("broken"));
        assert_eq!(err.into_error(), Some(DecodeError::custom("broken")));
    }

    #[test]
    fn test_display() {
        assert_eq!(pure("x").to_string(), "Success(\"x\")");
        assert_eq!(
            Decoded::<i32>::missing_key("email").to_string(),
            "Failure(MissingKey(email))"
        );
    }

    #[test]
    fn test_collect_reports_first_failure() {
        let items = vec![
            pure(1),
            Decoded::missing_key("second"),
            Decoded::missing_key("third"),
        ];
        let collected: Decoded<Vec<i32>> = items.into_iter().collect();
        assert_eq!(collected.into_error(), Some(DecodeError::missing_key("second")));

        let collected: Decoded<Vec<i32>> = vec![pure(1), pure(2)].into_iter().collect();
        assert_eq!(collected, pure(vec![1, 2]));
    }

    #[test]
    fn test_unwrap_or() {
        assert_eq!(Decoded::<i32>::custom("x").unwrap_or(9), 9);
        assert_eq!(pure(1).unwrap_or(9), 1);
        assert_eq!(
            Decoded::<String>::missing_key("k").unwrap_or_else(|e| e.to_string()),
            "MissingKey(k)"
        );
    }
}
