//! Error types for datepicker-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),

    #[error("Missing required callback: {0}")]
    MissingCallback(&'static str),
}

pub type Result<T> = std::result::Result<T, PickerError>;
