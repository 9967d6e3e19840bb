//! # Demo Error Types
//!
//! Everything that can stop the demo before or while it runs. Stock shortfalls
//! are NOT errors here: the runner renders them into the transcript.

use std::path::PathBuf;

use storefront_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for the demo app.
pub type DemoResult<T> = Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    /// Unknown flag or a flag missing its value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A config path was given explicitly but does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Config file is not valid TOML for `DemoConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but describes an impossible scenario.
    #[error("Invalid config: {0}")]
    Validation(#[from] ValidationError),

    /// Order failure other than insufficient stock.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to serialize receipts: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DemoError::ConfigNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "Config file not found: /tmp/missing.toml");

        let err: DemoError = ValidationError::Required {
            field: "customer.first_name".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid config: customer.first_name is required");
    }
}
