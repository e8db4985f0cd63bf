//! Error handling for EqCurve
//!
//! Only entry-point functions fail. Per-point response evaluation never
//! errors: invalid numeric states degrade to a 0 dB contribution so that
//! visualization callers survive partially-edited band data.

use thiserror::Error;

/// Result type alias for EqCurve operations
pub type Result<T> = std::result::Result<T, EqCurveError>;

/// Main error type for EqCurve operations
#[derive(Error, Debug)]
pub enum EqCurveError {
    /// A parameter failed its input contract at an entry point
    #[error("Invalid parameter '{param}': got {value}, expected {expected}")]
    InvalidParameter {
        param: String,
        value: String,
        expected: String,
    },

    /// A structurally required field was absent from a state record
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EqCurveError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            EqCurveError::InvalidParameter { .. } => "INVALID_PARAMETER",
            EqCurveError::MissingField { .. } => "MISSING_FIELD",
            EqCurveError::Io(_) => "IO_ERROR",
            EqCurveError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = EqCurveError::InvalidParameter {
            param: "num_points".to_string(),
            value: "0".to_string(),
            expected: "at least 1".to_string(),
        };
        assert_eq!(err.error_code(), "INVALID_PARAMETER");

        let err = EqCurveError::MissingField {
            field: "bands".to_string(),
        };
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_error_display() {
        let err = EqCurveError::InvalidParameter {
            param: "num_points".to_string(),
            value: "0".to_string(),
            expected: "at least 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("num_points"));
        assert!(msg.contains("at least 1"));
    }
}
