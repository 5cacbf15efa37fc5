/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Arrays and objects nest; any other token is converted with `Value::from`, so
/// the literal's Rust type picks the kind (`1` is `Int32`, `1u8` is `Uint8`,
/// `1.5` is `Double`).
///
/// ```rust
/// use sin::{sin, Kind};
///
/// let value = sin!({
///     "name": "sin",
///     "ports": [80u16, 443u16],
///     "debug": false
/// });
/// assert_eq!(value["ports"][1].kind(), Kind::Uint16);
/// ```
#[macro_export]
macro_rules! sin {
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
        $crate::Value::Array(vec![$($crate::sin!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::SinMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::SinMap::new();
        $(
            object.insert($key.to_string(), $crate::sin!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{SinMap, Value};

    #[test]
    fn test_sin_macro_scalars() {
        assert_eq!(sin!(true), Value::Bool(true));
        assert_eq!(sin!(false), Value::Bool(false));
        assert_eq!(sin!(42), Value::Int32(42));
        assert_eq!(sin!(42u64), Value::Uint64(42));
        assert_eq!(sin!(3.5), Value::Double(3.5));
        assert_eq!(sin!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_sin_macro_arrays() {
        assert_eq!(sin!([]), Value::Array(vec![]));
        assert_eq!(
            sin!([1i8, [true], {}]),
            Value::Array(vec![
                Value::Int8(1),
                Value::Array(vec![Value::Bool(true)]),
                Value::Object(SinMap::new()),
            ])
        );
    }

    #[test]
    fn test_sin_macro_objects() {
        assert_eq!(sin!({}), Value::Object(SinMap::new()));

        let obj = sin!({
            "name": "Alice",
            "age": 30u8,
        });
        let map = obj.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name"), Some(&Value::from("Alice")));
        assert_eq!(map.get("age"), Some(&Value::Uint8(30)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["name", "age"]);
    }
}
