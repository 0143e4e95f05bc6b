//! Conversion of any `T: Serialize` into a [`Value`].
//!
//! [`ValueSerializer`] is the typed boundary in front of the describer: it classifies every
//! serde data model item as a scalar, a keyed container or a named record, so the describer
//! itself never has to look at Rust types.
//!
//! ## Mapping
//!
//! - integers become [`Number::Integer`]; `u64` above `i64::MAX` becomes [`Number::Float`];
//!   128-bit integers outside the `i64` range are rejected
//! - floats become [`Number::Float`], `char` and strings become [`Value::String`]
//! - `None` and `()` become [`Value::Null`]; `Some` and newtype structs are transparent
//! - sequences, tuples and byte strings become lists
//! - maps become keyed containers; integer, bool and float keys become indexes (floats
//!   truncated), string and char keys become names, `None` and `()` become the empty name;
//!   container and record keys are rejected
//! - structs, tuple structs and unit structs become records named after the type
//! - unit variants become the variant name as a string; other variants become records named
//!   `Enum::Variant`
//!
//! ```rust
//! use var_type::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! enum Shape {
//!     Circle { radius: f64 },
//!     Empty,
//! }
//!
//! let circle = to_value(&Shape::Circle { radius: 1.0 }).unwrap();
//! assert_eq!(circle.as_record().map(|r| r.name()), Some("Shape::Circle"));
//!
//! let empty = to_value(&Shape::Empty).unwrap();
//! assert_eq!(empty, Value::from("Empty"));
//! ```

use crate::{Error, Key, KeyedArray, Number, Record, Result, Value};
use serde::{ser, Serialize};

/// Serializer producing a [`Value`] tree.
pub struct ValueSerializer;

pub struct SerializeVec {
    array: KeyedArray,
}

pub struct SerializeMap {
    array: KeyedArray,
    current_key: Option<Key>,
}

/// Collects struct and variant fields. Tuple-like fields are named by position.
pub struct SerializeRecord {
    record: Record,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeRecord;
    type SerializeTupleVariant = SerializeRecord;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = SerializeRecord;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        i64::try_from(v)
            .map(|i| Value::Number(Number::Integer(i)))
            .map_err(|_| Error::unsupported_type(&format!("i128 value {} is out of range", v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Number(Number::Integer(i))),
            Err(_) => Ok(Value::Number(Number::Float(v as f64))),
        }
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        i64::try_from(v)
            .map(|i| Value::Number(Number::Integer(i)))
            .map_err(|_| Error::unsupported_type(&format!("u128 value {} is out of range", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::Float(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Ok(Value::Record(Record::new(name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let record = Record::new(variant_name(name, variant)).with_field("0", to_value(value)?);
        Ok(Value::Record(record))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, name: &'static str, _len: usize) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(name.to_string()))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(variant_name(name, variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            array: KeyedArray::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(name.to_string()))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(variant_name(name, variant)))
    }
}

fn variant_name(name: &str, variant: &str) -> String {
    format!("{}::{}", name, variant)
}

impl SerializeVec {
    fn with_capacity(capacity: usize) -> Self {
        SerializeVec {
            array: KeyedArray::with_capacity(capacity),
        }
    }
}

impl SerializeRecord {
    fn new(name: String) -> Self {
        SerializeRecord {
            record: Record::new(name),
        }
    }

    fn push_positional<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let position = self.record.len().to_string();
        self.record.insert(position, to_value(value)?);
        Ok(())
    }

    fn push_named<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.record.insert(key, to_value(value)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.array.push(to_value(value)?)?;
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.array))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.array.push(to_value(value)?)?;
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.array))
    }
}

impl ser::SerializeTupleStruct for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push_positional(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.record))
    }
}

impl ser::SerializeTupleVariant for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push_positional(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.record))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_value(key)? {
            Value::Number(Number::Integer(i)) => Key::Index(i),
            Value::String(s) => Key::Name(s),
            Value::Bool(b) => Key::Index(i64::from(b)),
            // Truncates toward zero; saturates outside the i64 range
            Value::Number(Number::Float(f)) => Key::Index(f as i64),
            Value::Null => Key::Name(String::new()),
            other => {
                tracing::debug!("rejected map key {:?}", other);
                return Err(Error::invalid_key(&format!(
                    "map keys must be scalars, found {:?}",
                    other
                )));
            }
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.array.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.array))
    }
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push_named(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.record))
    }
}

impl ser::SerializeStructVariant for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push_named(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.record))
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Meters(f64);

    #[derive(Serialize)]
    struct Pair(i32, String);

    #[derive(Serialize)]
    struct Marker;

    #[derive(Serialize)]
    enum Event {
        Ping,
        Moved(i32, i32),
        Renamed(String),
        Resized { width: u32, height: u32 },
    }

    #[test]
    fn test_newtype_struct_is_transparent() {
        assert_eq!(to_value(&Meters(1.5)).unwrap(), Value::from(1.5));
    }

    #[test]
    fn test_tuple_struct_is_positional_record() {
        let expected = Record::new("Pair")
            .with_field("0", 1)
            .with_field("1", "one");
        assert_eq!(
            to_value(&Pair(1, "one".to_string())).unwrap(),
            Value::Record(expected)
        );
    }

    #[test]
    fn test_unit_struct_is_empty_record() {
        assert_eq!(to_value(&Marker).unwrap(), Value::Record(Record::new("Marker")));
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_value(&Event::Ping).unwrap(), Value::from("Ping"));
        assert_eq!(
            to_value(&Event::Moved(1, 2)).unwrap(),
            Value::Record(Record::new("Event::Moved").with_field("0", 1).with_field("1", 2))
        );
        assert_eq!(
            to_value(&Event::Renamed("x".to_string())).unwrap(),
            Value::Record(Record::new("Event::Renamed").with_field("0", "x"))
        );
        assert_eq!(
            to_value(&Event::Resized {
                width: 3,
                height: 4
            })
            .unwrap(),
            Value::Record(
                Record::new("Event::Resized")
                    .with_field("width", 3)
                    .with_field("height", 4)
            )
        );
    }

    #[test]
    fn test_integer_edges() {
        assert_eq!(
            to_value(&u64::MAX).unwrap(),
            Value::Number(Number::Float(u64::MAX as f64))
        );
        assert_eq!(to_value(&7i128).unwrap(), Value::from(7));
        assert!(matches!(
            to_value(&i128::MAX),
            Err(Error::UnsupportedType(_))
        ));
        assert!(matches!(
            to_value(&u128::MAX),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(2, "b");
        map.insert(0, "a");
        let value = to_value(&map).unwrap();
        let keys: Vec<_> = value.as_array().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec![Key::Index(0), Key::Index(2)]);

        let mut flags = BTreeMap::new();
        flags.insert(false, 1);
        flags.insert(true, 2);
        assert!(to_value(&flags).unwrap().as_array().unwrap().is_list());

        let mut inner = BTreeMap::new();
        inner.insert("k", 1);
        let mut nested = BTreeMap::new();
        nested.insert(vec!["k"], inner);
        assert!(matches!(to_value(&nested), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_float_and_null_map_keys() {
        struct Entries(Vec<(Value, &'static str)>);

        impl Serialize for Entries {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
            }
        }

        let entries = Entries(vec![
            (Value::from(1.9), "one"),
            (Value::from(-2.5), "minus two"),
            (Value::Null, "empty"),
        ]);
        let value = to_value(&entries).unwrap();
        let keys: Vec<_> = value.as_array().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Key::Index(1), Key::Index(-2), Key::Name(String::new())]
        );

        let mut by_unit = BTreeMap::new();
        by_unit.insert((), 1);
        let value = to_value(&by_unit).unwrap();
        assert_eq!(value.as_array().unwrap().get(&Key::from("")), Some(&Value::from(1)));
    }

    #[test]
    fn test_bytes_become_list() {
        struct Raw<'a>(&'a [u8]);

        impl Serialize for Raw<'_> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_bytes(self.0)
            }
        }

        let value = to_value(&Raw(&[1, 2])).unwrap();
        assert_eq!(value, Value::from(vec![Value::from(1), Value::from(2)]));
    }
}
