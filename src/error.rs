//! Error types for archive construction and maintenance.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors raised by archives, truncation engines and their configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArchiveError {
    #[error("Invalid archive configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Objective vector has {actual} values, archive expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Objective {index} is not finite: {value}")]
    NonFiniteObjective { index: usize, value: f64 },

    #[error("Index {index} out of range for archive of size {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid reference directions: {reason}")]
    InvalidReferenceDirections { reason: String },
}

impl ArchiveError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_directions(reason: impl Into<String>) -> Self {
        Self::InvalidReferenceDirections {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let error = ArchiveError::DimensionMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            error.to_string(),
            "Objective vector has 3 values, archive expects 2"
        );
    }

    #[test]
    fn test_invalid_config_message() {
        let error = ArchiveError::invalid_config("capacity must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid archive configuration: capacity must be at least 1"
        );
    }

    #[test]
    fn test_index_out_of_range_message() {
        let error = ArchiveError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(error.to_string(), "Index 4 out of range for archive of size 2");
    }
}
