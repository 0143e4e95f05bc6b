//! The type describer.
//!
//! Turns a [`Value`] into a type string following this grammar:
//!
//! ```text
//! TypeString      := Scalar | "array" | ListType | RecordType | NamedRecordType
//! Scalar          := "int" | "float" | "bool" | "string" | "null"
//! ListType        := "array<" TypeString ("|" TypeString)* ">"
//! RecordType      := "array{" FieldList "}"
//! NamedRecordType := TypeName | TypeName "{" FieldList "}"
//! FieldList       := Field (", " Field)*
//! Field           := KeyOrFieldName ": " TypeString
//! ```
//!
//! A keyed container describes as a list when its keys are exactly `0..n` in order (see
//! [`KeyedArray::is_list`]), and as `array{...}` otherwise. List element types form a union
//! with duplicates dropped, in first-seen order. Keys and field names are written verbatim.
//!
//! ## Examples
//!
//! ```rust
//! use var_type::{describe, value};
//!
//! assert_eq!(describe(&value!([1, 1.1, "x"])), "array<int|float|string>");
//! assert_eq!(
//!     describe(&value!({"a": 1, "b": "s", "c": true})),
//!     "array{a: int, b: string, c: bool}"
//! );
//! assert_eq!(describe(&value!(User { name: "Jane", age: 28 })), "User{name: string, age: int}");
//! ```

use crate::{DescribeOptions, Error, KeyedArray, Number, Record, RecordStyle, Result, Value};
use indexmap::IndexSet;
use std::fmt::{self, Write};

/// Describes values with a fixed set of [`DescribeOptions`].
///
/// A `Describer` holds no state beyond its options; it can be shared freely between threads.
#[derive(Clone, Debug, Default)]
pub struct Describer {
    options: DescribeOptions,
}

impl Describer {
    #[must_use]
    pub fn new(options: DescribeOptions) -> Self {
        Describer { options }
    }

    #[must_use]
    pub fn options(&self) -> &DescribeOptions {
        &self.options
    }

    /// Describes `value`, ignoring [`DescribeOptions::max_depth`].
    #[must_use]
    pub fn describe(&self, value: &Value) -> String {
        let type_string = self.type_of(value);
        tracing::trace!("described value as {}", type_string);
        type_string
    }

    /// Describes `value`, first checking it against [`DescribeOptions::max_depth`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DepthLimitExceeded`] when the value is nested deeper than the limit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use var_type::{value, Describer, DescribeOptions};
    ///
    /// let describer = Describer::new(DescribeOptions::new().with_max_depth(2));
    /// assert_eq!(describer.try_describe(&value!([1, 2])).unwrap(), "array<int>");
    /// assert!(describer.try_describe(&value!([[1]])).is_err());
    /// ```
    pub fn try_describe(&self, value: &Value) -> Result<String> {
        if let Some(limit) = self.options.max_depth {
            let depth = value.depth();
            if depth > limit {
                tracing::debug!(depth, limit, "value nested beyond the depth limit");
                return Err(Error::depth_limit_exceeded(depth, limit));
            }
        }
        Ok(self.describe(value))
    }

    fn type_of(&self, value: &Value) -> String {
        let mut output = String::new();
        self.write_type(&mut output, value);
        output
    }

    fn write_type(&self, output: &mut String, value: &Value) {
        match value {
            Value::Array(array) => self.write_array(output, array),
            Value::Record(record) => self.write_record(output, record),
            scalar => output.push_str(scalar_type(scalar)),
        }
    }

    fn write_array(&self, output: &mut String, array: &KeyedArray) {
        if array.is_empty() {
            output.push_str("array");
        } else if array.is_list() {
            let union: IndexSet<String> =
                array.values().map(|value| self.type_of(value)).collect();
            output.push_str("array<");
            for (i, element_type) in union.iter().enumerate() {
                if i > 0 {
                    output.push('|');
                }
                output.push_str(element_type);
            }
            output.push('>');
        } else {
            output.push_str("array{");
            self.write_fields(output, array.iter());
            output.push('}');
        }
    }

    fn write_record(&self, output: &mut String, record: &Record) {
        output.push_str(record.name());
        if record.is_empty() || self.options.record_style == RecordStyle::NameOnly {
            return;
        }
        output.push('{');
        self.write_fields(output, record.fields());
        output.push('}');
    }

    fn write_fields<'a, K>(
        &self,
        output: &mut String,
        fields: impl Iterator<Item = (K, &'a Value)>,
    ) where
        K: fmt::Display,
    {
        for (i, (name, value)) in fields.enumerate() {
            if i > 0 {
                output.push_str(", ");
            }
            // Writing into a String cannot fail
            let _ = write!(output, "{}: ", name);
            self.write_type(output, value);
        }
    }
}

/// Scalar kinds, checked in priority order: integer, float, boolean, null, then text.
#[inline]
fn scalar_type(value: &Value) -> &'static str {
    match value {
        Value::Number(Number::Integer(_)) => "int",
        Value::Number(Number::Float(_)) => "float",
        Value::Bool(_) => "bool",
        Value::Null => "null",
        _ => "string",
    }
}

/// Describes `value` with default options.
///
/// Total over the value model: every value yields exactly one type string.
///
/// # Examples
///
/// ```rust
/// use var_type::{describe, value, Value};
///
/// assert_eq!(describe(&Value::Null), "null");
/// assert_eq!(describe(&value!([])), "array");
/// assert_eq!(describe(&value!({0: 1, 1: "str", "key": true})), "array{0: int, 1: string, key: bool}");
/// ```
#[must_use]
pub fn describe(value: &Value) -> String {
    Describer::default().describe(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{value, Key};

    #[test]
    fn test_scalars() {
        assert_eq!(describe(&Value::from(1)), "int");
        assert_eq!(describe(&Value::from(1.0)), "float");
        assert_eq!(describe(&Value::from(false)), "bool");
        assert_eq!(describe(&Value::from("1")), "string");
        assert_eq!(describe(&Value::Null), "null");
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(describe(&Value::Array(KeyedArray::new())), "array");
    }

    #[test]
    fn test_list_union_keeps_first_seen_order() {
        let value = value!(["a", 1, "b", 2.5, 3, null]);
        assert_eq!(describe(&value), "array<string|int|float|null>");
    }

    #[test]
    fn test_union_of_nested_shapes() {
        let value = value!([[1], [2, 3], ["x"], []]);
        assert_eq!(describe(&value), "array<array<int>|array<string>|array>");
    }

    #[test]
    fn test_non_sequential_keys() {
        let sparse: KeyedArray = [
            (Key::Index(1), Value::from("a")),
            (Key::Index(3), Value::from("b")),
        ]
        .into_iter()
        .collect();
        assert_eq!(describe(&Value::from(sparse)), "array{1: string, 3: string}");

        let single: KeyedArray = [(Key::Index(1), Value::from("x"))].into_iter().collect();
        assert_eq!(describe(&Value::from(single)), "array{1: string}");
    }

    #[test]
    fn test_text_index_keys_describe_as_list() {
        let value = value!({"0": "a", "1": "b", "2": "c"});
        assert_eq!(describe(&value), "array<string>");
    }

    #[test]
    fn test_record_without_fields() {
        assert_eq!(describe(&Value::from(Record::new("Marker"))), "Marker");
    }

    #[test]
    fn test_name_only_style() {
        let describer =
            Describer::new(DescribeOptions::new().with_record_style(RecordStyle::NameOnly));
        let value = value!({
            "owner": User { name: "Jane" },
            "members": [User { name: "Joe" }]
        });
        assert_eq!(
            describer.describe(&value),
            "array{owner: User, members: array<User>}"
        );
    }

    #[test]
    fn test_try_describe_depth_limit() {
        let describer = Describer::new(DescribeOptions::new().with_max_depth(3));
        let value = value!({"a": {"b": {"c": 1}}});

        assert_eq!(
            describer.try_describe(&value),
            Err(Error::DepthLimitExceeded { depth: 4, limit: 3 })
        );
        assert_eq!(
            describer.describe(&value),
            "array{a: array{b: array{c: int}}}"
        );
    }

    #[test]
    fn test_deterministic() {
        let value = value!({"a": [1, "x"], "b": Item { id: 1 }});
        assert_eq!(describe(&value), describe(&value));
    }
}
