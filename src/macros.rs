/// Builds a [`Value`](crate::Value) from a literal-like syntax.
///
/// - `null`, `true`, `false`
/// - `[a, b, ...]`: a list (keys `0..n`)
/// - `{key: value, ...}`: a keyed container; keys are integer or string literals
/// - `Name { field: value, ... }`: a named record
/// - anything else is converted with `Value::from`
///
/// # Examples
///
/// ```rust
/// use var_type::{describe, value};
///
/// let user = value!(User {
///     name: "Jane",
///     age: 28,
///     roles: ["admin", "editor"]
/// });
/// assert_eq!(describe(&user), "User{name: string, age: int, roles: array<string>}");
///
/// let mixed = value!({0: 1, 1: "str", "key": true});
/// assert_eq!(describe(&mixed), "array{0: int, 1: string, key: bool}");
/// ```
#[macro_export]
macro_rules! value {
    // List entries
    (@array $list:ident) => {};

    (@array $list:ident $name:ident { $($body:tt)* } $(, $($rest:tt)*)?) => {
        $list.push($crate::value!($name { $($body)* }));
        $crate::value!(@array $list $($($rest)*)?);
    };

    (@array $list:ident - $num:literal $(, $($rest:tt)*)?) => {
        $list.push($crate::value!(-$num));
        $crate::value!(@array $list $($($rest)*)?);
    };

    (@array $list:ident $elem:tt $(, $($rest:tt)*)?) => {
        $list.push($crate::value!($elem));
        $crate::value!(@array $list $($($rest)*)?);
    };

    // Keyed container entries
    (@object $array:ident) => {};

    (@object $array:ident $key:literal : $name:ident { $($body:tt)* } $(, $($rest:tt)*)?) => {
        $array.insert($crate::Key::from($key), $crate::value!($name { $($body)* }));
        $crate::value!(@object $array $($($rest)*)?);
    };

    (@object $array:ident $key:literal : - $num:literal $(, $($rest:tt)*)?) => {
        $array.insert($crate::Key::from($key), $crate::value!(-$num));
        $crate::value!(@object $array $($($rest)*)?);
    };

    (@object $array:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $array.insert($crate::Key::from($key), $crate::value!($value));
        $crate::value!(@object $array $($($rest)*)?);
    };

    // Record fields
    (@record $record:ident) => {};

    (@record $record:ident $field:ident : $name:ident { $($body:tt)* } $(, $($rest:tt)*)?) => {
        $record.insert(::std::stringify!($field), $crate::value!($name { $($body)* }));
        $crate::value!(@record $record $($($rest)*)?);
    };

    (@record $record:ident $field:ident : - $num:literal $(, $($rest:tt)*)?) => {
        $record.insert(::std::stringify!($field), $crate::value!(-$num));
        $crate::value!(@record $record $($($rest)*)?);
    };

    (@record $record:ident $field:ident : $value:tt $(, $($rest:tt)*)?) => {
        $record.insert(::std::stringify!($field), $crate::value!($value));
        $crate::value!(@record $record $($($rest)*)?);
    };

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
        $crate::Value::Array($crate::KeyedArray::new())
    };

    ([ $($elems:tt)+ ]) => {{
        let mut list: ::std::vec::Vec<$crate::Value> = ::std::vec::Vec::new();
        $crate::value!(@array list $($elems)+);
        $crate::Value::from(list)
    }};

    ({}) => {
        $crate::Value::Array($crate::KeyedArray::new())
    };

    ({ $($entries:tt)+ }) => {{
        let mut array = $crate::KeyedArray::new();
        $crate::value!(@object array $($entries)+);
        $crate::Value::Array(array)
    }};

    ($name:ident { $($fields:tt)* }) => {{
        #[allow(unused_mut)]
        let mut record = $crate::Record::new(::std::stringify!($name));
        $crate::value!(@record record $($fields)*);
        $crate::Value::Record(record)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
