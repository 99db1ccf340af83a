//! Error types for the configuration and file-format layers
//!
//! The simulation core never fails; only loading configuration and reading
//! saved-match files can.

use thiserror::Error;

/// Rejected or unreadable configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i32 },

    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },

    #[error("paddle height {paddle_height} exceeds field height {height}")]
    PaddleTooTall { paddle_height: i32, height: i32 },

    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange { name: &'static str, min: i32, max: i32 },
}

/// Saved-match log could not be read or parsed
#[derive(Error, Debug)]
pub enum MatchLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing header line")]
    MissingHeader,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid value {value:?} on line {line}")]
    InvalidValue { line: usize, value: String },

    #[error("truncated data: header declares {expected} values, found {found}")]
    Truncated { expected: usize, found: usize },
}
