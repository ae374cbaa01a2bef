//! Precondition checks shared by constructors and calendar operations

use crate::error::{Error, Result};

/// Fails when `value` is missing, empty or whitespace only.
pub fn not_blank<'a>(param: &'static str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(Error::argument(param, "value cannot be empty or whitespace")),
        None => Err(Error::argument(param, "value is required")),
    }
}

/// Fails when a required optional argument is absent.
pub fn not_null<T>(param: &'static str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::argument(param, "value is required"))
}

pub fn positive(param: &'static str, value: i64) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(Error::out_of_range(
            param,
            format!("must be greater than zero, got {value}"),
        ))
    }
}

pub fn non_negative(param: &'static str, value: i64) -> Result<()> {
    if value >= 0 {
        Ok(())
    } else {
        Err(Error::out_of_range(
            param,
            format!("must not be negative, got {value}"),
        ))
    }
}

/// Fails when `value` is below `min`.
pub fn minimum<T>(param: &'static str, value: T, min: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min {
        Err(Error::out_of_range(
            param,
            format!("must be at least {min}, got {value}"),
        ))
    } else {
        Ok(())
    }
}

/// Fails when `value` is above `max`.
pub fn maximum<T>(param: &'static str, value: T, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value > max {
        Err(Error::out_of_range(
            param,
            format!("must be at most {max}, got {value}"),
        ))
    } else {
        Ok(())
    }
}
