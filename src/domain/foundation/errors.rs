//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object and configuration construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Unknown metric family '{family}'")]
    UnknownFamily { family: String },

    #[error("Metric '{metric}' is not recognized for family '{family}'")]
    UnknownMetric { family: String, metric: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown metric family error.
    pub fn unknown_family(family: impl Into<String>) -> Self {
        ValidationError::UnknownFamily {
            family: family.into(),
        }
    }

    /// Creates an unknown metric error.
    pub fn unknown_metric(family: impl Into<String>, metric: impl Into<String>) -> Self {
        ValidationError::UnknownMetric {
            family: family.into(),
            metric: metric.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidBenchmark,
    UnknownMetric,

    // State errors
    NoSnapshotAvailable,

    // Notification errors
    NotificationFailed,

    // Infrastructure errors
    SerializationFailed,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidBenchmark => "INVALID_BENCHMARK",
            ErrorCode::UnknownMetric => "UNKNOWN_METRIC",
            ErrorCode::NoSnapshotAvailable => "NO_SNAPSHOT_AVAILABLE",
            ErrorCode::NotificationFailed => "NOTIFICATION_FAILED",
            ErrorCode::SerializationFailed => "SERIALIZATION_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Error returned when a report is requested before any calculation ran.
    pub fn no_snapshot(engine: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::NoSnapshotAvailable,
            "No metrics snapshot available; run calculate first",
        )
        .with_detail("engine", engine.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::UnknownFamily { .. } | ValidationError::UnknownMetric { .. } => {
                ErrorCode::UnknownMetric
            }
            _ => ErrorCode::ValidationFailed,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("user_id");
        assert_eq!(format!("{}", err), "Field 'user_id' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("trend_threshold", 0.0, 1.0, 1.5);
        assert_eq!(
            format!("{}", err),
            "Field 'trend_threshold' must be between 0 and 1, got 1.5"
        );
    }

    #[test]
    fn validation_error_unknown_metric_displays_correctly() {
        let err = ValidationError::unknown_metric("precision", "recall_at_5");
        assert_eq!(
            format!("{}", err),
            "Metric 'recall_at_5' is not recognized for family 'precision'"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::InternalError, "Lock poisoned");
        assert_eq!(format!("{}", err), "[INTERNAL_ERROR] Lock poisoned");
    }

    #[test]
    fn no_snapshot_error_carries_engine_detail() {
        let err = DomainError::no_snapshot("effectiveness");
        assert_eq!(err.code, ErrorCode::NoSnapshotAvailable);
        assert_eq!(err.details.get("engine"), Some(&"effectiveness".to_string()));
    }

    #[test]
    fn domain_error_from_validation_maps_unknown_metric() {
        let err: DomainError = ValidationError::unknown_family("happiness").into();
        assert_eq!(err.code, ErrorCode::UnknownMetric);

        let err: DomainError = ValidationError::empty_field("id").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(
            format!("{}", ErrorCode::NoSnapshotAvailable),
            "NO_SNAPSHOT_AVAILABLE"
        );
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
