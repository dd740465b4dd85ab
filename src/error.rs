//! Unified error handling for DNNMark
//!
//! Consolidates the per-module error types (config, device, memory) into a
//! single crate-wide error with a category attached:
//! - Config errors (bad input files, actionable by users)
//! - Resource errors (device allocation, chunk lookup)
//! - Internal errors (bugs)
//!
//! Recoverable configuration conditions (unknown keywords, unknown values)
//! are *not* errors: the parser logs them and keeps going. Everything that
//! reaches this type aborts the current operation.

use std::fmt;

use crate::config::ConfigError;
use crate::device::DeviceError;
use crate::memory::MemoryError;

/// Crate-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum DnnMarkError {
    /// Fatal configuration error (unreadable file, malformed numeric value)
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Device allocator failure
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Memory pool failure (allocation, unknown chunk id)
    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),

    /// Internal error (indicates a bug)
    #[error("internal error: {0}")]
    Internal(String),
}

impl DnnMarkError {
    /// Categorize the error for handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DnnMarkError::Config(_) => ErrorCategory::Config,
            DnnMarkError::Device(_) => ErrorCategory::Resource,
            DnnMarkError::Memory(_) => ErrorCategory::Resource,
            DnnMarkError::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Configuration error: the user can fix the input file.
    pub fn is_config_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Config)
    }

    /// Resource error: device memory or pool lookup failed.
    pub fn is_resource_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Resource)
    }
}

/// Error category for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad configuration input - actionable by the user
    Config,
    /// Device memory or pool resource failure
    Resource,
    /// Internal error - indicates a bug
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Resource => write!(f, "Resource"),
            ErrorCategory::Internal => write!(f, "Internal"),
        }
    }
}

/// Result alias used across the crate.
pub type DnnMarkResult<T> = std::result::Result<T, DnnMarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = DnnMarkError::Config(ConfigError::InvalidNumber {
            keyword: "n".to_string(),
            value: "abc".to_string(),
        });
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.is_config_error());

        let err = DnnMarkError::Memory(MemoryError::ChunkNotFound(7));
        assert_eq!(err.category(), ErrorCategory::Resource);
        assert!(err.is_resource_error());

        let err = DnnMarkError::Internal("bug".to_string());
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn test_error_display() {
        let err = DnnMarkError::Memory(MemoryError::ChunkNotFound(3));
        assert!(err.to_string().contains('3'));

        assert_eq!(ErrorCategory::Config.to_string(), "Config");
        assert_eq!(ErrorCategory::Resource.to_string(), "Resource");
        assert_eq!(ErrorCategory::Internal.to_string(), "Internal");
    }

    #[test]
    fn test_io_error_converts_via_config() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.cfg");
        let err: DnnMarkError = ConfigError::from(io_err).into();
        assert!(err.is_config_error());
    }
}
