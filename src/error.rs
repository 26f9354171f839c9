//! Error types for the input, export and configuration layers
//!
//! The evaluators themselves never fail: missing or thin data is reported
//! through the outcome enums in [`crate::models::outcome`]. The errors here
//! cover everything around them, from decoding an archive to writing a CSV.

use thiserror::Error;

/// Main error type for the climate risk crate
#[derive(Error, Debug)]
pub enum ClimateRiskError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// JSON decoding errors
    #[error("Decode error: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    /// CSV export/import errors
    #[error("Export error: {source}")]
    Export {
        #[from]
        source: csv::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ClimateRiskError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClimateRiskError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            ClimateRiskError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ClimateRiskError::Decode { .. } => {
                "Could not read the historical data. Is it an Open-Meteo archive response?"
                    .to_string()
            }
            ClimateRiskError::Export { .. } => {
                "Failed to read or write the CSV report.".to_string()
            }
            ClimateRiskError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ClimateRiskError::config("bad weight");
        assert!(matches!(config_err, ClimateRiskError::Config { .. }));

        let validation_err = ClimateRiskError::validation("dates out of order");
        assert!(matches!(validation_err, ClimateRiskError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = ClimateRiskError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = ClimateRiskError::validation("length mismatch");
        assert!(validation_err.user_message().contains("length mismatch"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ClimateRiskError = io_err.into();
        assert!(matches!(err, ClimateRiskError::Io { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClimateRiskError = json_err.into();
        assert!(matches!(err, ClimateRiskError::Decode { .. }));
        assert!(err.to_string().starts_with("Decode error"));
    }
}
