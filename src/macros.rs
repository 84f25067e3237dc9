/// Builds an argument [`Value`](crate::Value) by hand.
///
/// - `args!()` is an empty mapping (the value of `.filter()`)
/// - `args!(expr)` is a positional literal
/// - `args! { "name" => expr, ... }` is a named mapping, in the given order
///
/// # Examples
///
/// ```rust
/// use gqlmark::{args, Literal, Value};
///
/// assert_eq!(args!(232), Value::Literal(Literal::Int(232)));
/// assert!(args!().as_mapping().map_or(false, |m| m.is_empty()));
///
/// let value = args! { "id" => 232, "recent" => true };
/// assert_eq!(value.get("recent"), Some(&Literal::Bool(true)));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Value::Mapping($crate::ArgMap::new())
    };

    ($($key:literal => $value:expr),+ $(,)?) => {{
        let mut map = $crate::ArgMap::new();
        $(
            map.insert($key.to_string(), $crate::Literal::from($value));
        )+
        $crate::Value::Mapping(map)
    }};

    ($value:expr) => {
        $crate::Value::Literal($crate::Literal::from($value))
    };
}
