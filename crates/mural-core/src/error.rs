//! Error types for mural-core
//!
//! Writes that are refused report a [`WriteRejection`]; construction and
//! restoration problems report an [`Error`]. Reads never fail.

use thiserror::Error;

/// Reason a write was not admitted to the update log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WriteRejection {
    /// Coordinate lies outside the canvas
    #[error("cell ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        /// Requested column
        x: u32,
        /// Requested row
        y: u32,
        /// Canvas width
        width: u32,
        /// Canvas height
        height: u32,
    },

    /// Writer acted within the rate window
    #[error("rate limited: retry after {retry_after_micros} microseconds")]
    RateLimited {
        /// Remaining cooldown in microseconds
        retry_after_micros: i64,
    },
}

impl WriteRejection {
    /// Whether the same write can succeed later
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Get error code for protocol messages
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::RateLimited { .. } => "rate_limited",
        }
    }
}

/// Canvas error type
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid canvas configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Restored records do not form a contiguous log
    #[error("sequence gap: expected record {expected}, found {found}")]
    SequenceGap {
        /// Sequence number the log expected next
        expected: u64,
        /// Sequence number actually found
        found: u64,
    },

    /// A restored record targets a coordinate outside the canvas
    #[error("record {sequence} targets ({x}, {y}) outside the canvas")]
    RecordOutOfBounds {
        /// Offending record
        sequence: u64,
        /// Record column
        x: u32,
        /// Record row
        y: u32,
    },

    /// A restored record has no writer, which only blank cells may lack
    #[error("record {sequence} has no writer")]
    RecordWithoutWriter {
        /// Offending record
        sequence: u64,
    },
}

impl Error {
    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Get error code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "invalid_config",
            Self::SequenceGap { .. } => "sequence_gap",
            Self::RecordOutOfBounds { .. } => "record_out_of_bounds",
            Self::RecordWithoutWriter { .. } => "record_without_writer",
        }
    }
}

/// Result type alias for canvas operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_codes() {
        let err = WriteRejection::OutOfBounds {
            x: 5,
            y: 0,
            width: 2,
            height: 2,
        };
        assert_eq!(err.code(), "out_of_bounds");
        assert!(!err.is_retriable());

        let err = WriteRejection::RateLimited {
            retry_after_micros: 1_000,
        };
        assert_eq!(err.code(), "rate_limited");
        assert!(err.is_retriable());
    }

    #[test]
    fn test_error_display() {
        let err = Error::SequenceGap {
            expected: 3,
            found: 5,
        };
        assert_eq!(err.code(), "sequence_gap");
        assert!(err.to_string().contains("expected record 3"));

        let err = Error::invalid_config("width must be positive");
        assert_eq!(err.code(), "invalid_config");
        assert!(err.to_string().contains("width must be positive"));
    }
}
