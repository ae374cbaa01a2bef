//! Error types for value construction and parsing

use thiserror::Error;

/// Message of every failed strict [`DateRange`](crate::DateRange) parse.
pub const INVALID_DATE_RANGE_FORMAT: &str =
    "Invalid DateRange format. Expected 'yyyy-MM-dd|yyyy-MM-dd' or 'yyyy-MM-dd|∞'.";

/// Message for an empty or whitespace-only JSON date range string.
pub const DATE_RANGE_EMPTY: &str = "DateRange string cannot be null/empty.";

/// Message for a JSON token that is not a string where a date range is expected.
pub const EXPECTED_JSON_STRING: &str = "Expected a JSON string for DateRange.";

/// Errors raised by constructors, parsers and calendar operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was missing, blank or inconsistent
    #[error("Invalid argument `{param}`: {message}")]
    Argument {
        param: &'static str,
        message: String,
    },

    /// A textual representation could not be parsed
    #[error("{0}")]
    Format(String),

    /// The operation is undefined for the current value
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A numeric argument fell outside its allowed bounds
    #[error("Argument `{param}` out of range: {message}")]
    OutOfRange {
        param: &'static str,
        message: String,
    },
}

impl Error {
    pub(crate) fn argument(param: &'static str, message: impl Into<String>) -> Self {
        Self::Argument {
            param,
            message: message.into(),
        }
    }

    pub(crate) fn out_of_range(param: &'static str, message: impl Into<String>) -> Self {
        Self::OutOfRange {
            param,
            message: message.into(),
        }
    }

    /// Name of the offending parameter, for argument and range errors
    #[must_use]
    pub const fn param(&self) -> Option<&'static str> {
        match self {
            Self::Argument { param, .. } | Self::OutOfRange { param, .. } => Some(*param),
            Self::Format(_) | Self::InvalidOperation(_) => None,
        }
    }
}

/// Result type for value operations
pub type Result<T> = std::result::Result<T, Error>;

/// Returned by bounded-buffer formatting when the destination is too short
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("buffer too small: {required} bytes required, {available} available")]
pub struct BufferTooSmall {
    /// Bytes the formatted value needs
    pub required: usize,

    /// Bytes the caller supplied
    pub available: usize,
}
