//! Configuration options for describing values.
//!
//! - [`DescribeOptions`]: main configuration struct
//! - [`RecordStyle`]: how named records are rendered
//!
//! The output grammar itself is fixed; options only pick between the two record renderings
//! and set an optional nesting ceiling.
//!
//! ## Examples
//!
//! ```rust
//! use var_type::{to_type_string_with_options, DescribeOptions, RecordStyle};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let options = DescribeOptions::new().with_record_style(RecordStyle::NameOnly);
//! let ty = to_type_string_with_options(&vec![Point { x: 1, y: 2 }], options).unwrap();
//! assert_eq!(ty, "array<Point>");
//! ```

/// Rendering of named records.
///
/// # Examples
///
/// ```rust
/// use var_type::{Describer, DescribeOptions, Record, RecordStyle, Value};
///
/// let user = Value::from(Record::new("User").with_field("id", 1));
///
/// let fields = Describer::new(DescribeOptions::new());
/// assert_eq!(fields.describe(&user), "User{id: int}");
///
/// let name_only = Describer::new(DescribeOptions::new().with_record_style(RecordStyle::NameOnly));
/// assert_eq!(name_only.describe(&user), "User");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RecordStyle {
    /// `Name{field: type, ...}`, or the bare name when there are no fields
    #[default]
    Fields,
    /// Always the bare type name
    NameOnly,
}

/// Configuration options for the describer.
///
/// # Examples
///
/// ```rust
/// use var_type::{DescribeOptions, RecordStyle};
///
/// // Defaults: field listing, no depth ceiling
/// let options = DescribeOptions::new();
/// assert_eq!(options.record_style, RecordStyle::Fields);
/// assert_eq!(options.max_depth, None);
///
/// let options = DescribeOptions::new()
///     .with_record_style(RecordStyle::NameOnly)
///     .with_max_depth(64);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DescribeOptions {
    pub record_style: RecordStyle,
    pub max_depth: Option<usize>,
}

impl DescribeOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how named records are rendered.
    #[must_use]
    pub fn with_record_style(mut self, record_style: RecordStyle) -> Self {
        self.record_style = record_style;
        self
    }

    /// Rejects values nested deeper than `max_depth` (see [`Value::depth`](crate::Value::depth)).
    ///
    /// Only fallible entry points enforce the ceiling.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
