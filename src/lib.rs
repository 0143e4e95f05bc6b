//! # var_type
//!
//! Describe the *shape* of a value as a compact type string, for debugging and introspection.
//!
//! Instead of printing what a value contains, `var_type` prints what it looks like:
//!
//! ```text
//! 42                                   => int
//! [1, 1.1, "x"]                        => array<int|float|string>
//! {"a": 1, "b": "s"}                   => array{a: int, b: string}
//! User { name: "Jane", roles: [..] }   => User{name: string, roles: array<string>}
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use var_type::to_type_string;
//!
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//!     roles: Vec<String>,
//! }
//!
//! let user = User {
//!     name: "Jane".to_string(),
//!     age: 28,
//!     roles: vec!["admin".to_string(), "editor".to_string()],
//! };
//!
//! let ty = to_type_string(&user).unwrap();
//! assert_eq!(ty, "User{name: string, age: int, roles: array<string>}");
//! ```
//!
//! ## Value Model
//!
//! Every input is first classified into a [`Value`]: a scalar (`int`, `float`, `bool`,
//! `string`, `null`), a keyed container ([`KeyedArray`]) or a named record ([`Record`]).
//! Rust values get there through serde with [`to_value`]; documents in any serde format can be
//! deserialized straight into a [`Value`]; and the [`value!`] macro builds one by hand.
//!
//! ## Lists and Keyed Containers
//!
//! A keyed container whose keys are exactly `0, 1, ..., n-1` in order describes as a list,
//! `array<...>`, with the distinct element types joined by `|`. Any other key layout describes
//! entry by entry as `array{key: type, ...}`. Text keys that spell an integer count as that
//! integer, so the JSON object `{"0": "a", "1": "b"}` is a list too.
//!
//! ```rust
//! use var_type::{describe, value, Value};
//!
//! assert_eq!(describe(&value!([])), "array");
//! assert_eq!(describe(&value!([1, 2, 3])), "array<int>");
//! assert_eq!(describe(&value!({1: "a", 3: "b"})), "array{1: string, 3: string}");
//!
//! let json: Value = serde_json::from_str(r#"{"0": "a", "1": "b"}"#).unwrap();
//! assert_eq!(describe(&json), "array<string>");
//! ```
//!
//! ## Printing
//!
//! [`dump`] writes the type string to standard output without a trailing newline; use
//! [`to_writer`] for any other destination.

pub mod describe;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use describe::{describe, Describer};
pub use error::{Error, Result};
pub use map::{Key, KeyedArray};
pub use options::{DescribeOptions, RecordStyle};
pub use ser::ValueSerializer;
pub use value::{Number, Record, Value};

use serde::Serialize;
use std::io;

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use var_type::to_value;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_record());
/// ```
///
/// # Errors
///
/// Returns an error if the value holds something the model cannot represent, such as a map
/// key that is itself a sequence, map or struct.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    let value = value.serialize(ValueSerializer)?;
    tracing::trace!("converted {} to a value", std::any::type_name::<T>());
    Ok(value)
}

/// Describe any `T: Serialize` with default options.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use var_type::to_type_string;
///
/// let mut scores = BTreeMap::new();
/// scores.insert("alice", vec![1.5, 2.0]);
///
/// assert_eq!(to_type_string(&scores).unwrap(), "array{alice: array<float>}");
/// assert_eq!(to_type_string(&Some(3)).unwrap(), "int");
/// assert_eq!(to_type_string(&None::<i32>).unwrap(), "null");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted (see [`to_value`]).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_type_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_type_string_with_options(value, DescribeOptions::default())
}

/// Describe any `T: Serialize` with custom options.
///
/// # Examples
///
/// ```rust
/// use var_type::{to_type_string_with_options, DescribeOptions, Error};
///
/// let deep = vec![vec![vec![1]]];
/// let options = DescribeOptions::new().with_max_depth(3);
/// assert!(matches!(
///     to_type_string_with_options(&deep, options),
///     Err(Error::DepthLimitExceeded { depth: 4, limit: 3 })
/// ));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted, or if it is nested deeper than
/// [`DescribeOptions::max_depth`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_type_string_with_options<T>(value: &T, options: DescribeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    Describer::new(options).try_describe(&value)
}

/// Write the type string of any `T: Serialize` to a writer, without a trailing newline.
///
/// # Examples
///
/// ```rust
/// use var_type::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &(1, "two")).unwrap();
/// assert_eq!(buffer, b"array<int|string>");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let type_string = to_type_string(value)?;
    writer
        .write_all(type_string.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Print the type string of any `T: Serialize` to standard output, without a trailing newline.
///
/// # Examples
///
/// ```rust
/// var_type::dump(&vec!["a", "b"]).unwrap(); // prints: array<string>
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted or standard output cannot be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn dump<T>(value: &T) -> Result<()>
where
    T: ?Sized + Serialize,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    to_writer(&mut handle, value)?;
    io::Write::flush(&mut handle).map_err(|e| Error::io(&e.to_string()))
}
