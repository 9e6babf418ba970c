/// Builds a [`Value`](crate::Value) tree from a JSON-like literal.
///
/// Leaves are converted with `Value::from`, so any type with a `From`
/// conversion can appear in leaf position. Negative numbers nested inside
/// arrays or objects need parentheses: `value!([(-1), 2])`.
///
/// # Examples
///
/// ```rust
/// use decodable::{value, Value};
///
/// let user = value!({
///     "id": 1,
///     "name": "Cool User",
///     "tags": ["a", "b"],
///     "email": null
/// });
///
/// assert_eq!(user.get("id"), Some(&Value::from(1)));
/// assert_eq!(user.get("email"), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::ValueMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ValueMap::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($s:expr) => {
        $crate::Value::from($s)
    };
}
