//! Error types for the typed boundary around the describer.
//!
//! [`describe`](crate::describe) itself never fails. Errors only arise when a Rust value is
//! converted into a [`Value`](crate::Value), when a depth ceiling is configured, or when the
//! resulting type string is written somewhere.
//!
//! ## Error Categories
//!
//! - **Unsupported Types**: serde values the model cannot hold (128-bit integers out of range)
//! - **Invalid Keys**: map keys that are sequences, maps or structs
//! - **Depth Limit**: values nested deeper than [`DescribeOptions::max_depth`](crate::DescribeOptions)
//! - **Index Overflow**: appending to a container that already holds index `i64::MAX`
//! - **I/O Errors**: failures writing the type string
//!
//! ## Examples
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use var_type::{to_type_string, Error};
//!
//! let mut map = BTreeMap::new();
//! map.insert(vec![1, 2], "composite keys are not supported");
//!
//! let result = to_type_string(&map);
//! assert!(matches!(result, Err(Error::InvalidKey(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised around describing a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while writing a type string
    #[error("IO error: {0}")]
    Io(String),

    /// Serde value with no counterpart in the value model
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Map key that cannot become an integer or string key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Value nested deeper than the configured ceiling
    #[error("Value nesting depth {depth} exceeds the limit of {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    /// Append to a container whose next integer index would overflow
    #[error("Cannot append: the next index is already occupied")]
    NextIndexOccupied,

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported type error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use var_type::Error;
    ///
    /// let err = Error::unsupported_type("i128 value out of range");
    /// assert!(err.to_string().contains("i128"));
    /// ```
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an invalid key error for map keys outside the key model.
    pub fn invalid_key(msg: &str) -> Self {
        Error::InvalidKey(msg.to_string())
    }

    /// Creates a depth limit error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use var_type::Error;
    ///
    /// let err = Error::depth_limit_exceeded(12, 8);
    /// assert!(err.to_string().contains("limit of 8"));
    /// ```
    pub fn depth_limit_exceeded(depth: usize, limit: usize) -> Self {
        Error::DepthLimitExceeded { depth, limit }
    }

    /// Creates the error for appending past `i64::MAX`.
    pub fn next_index_occupied() -> Self {
        Error::NextIndexOccupied
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
