//! Error types and result aliases for lockgraph operations.
//!
//! A single error enum covers tree construction and input loading. Traversal
//! never produces these: visitor errors are returned to the caller as-is.

use thiserror::Error;

/// Unified error type for all lockgraph operations
#[derive(Error, Debug)]
pub enum LockgraphError {
    // Build errors
    #[error("{name} not accessible from {required_by} (no lock entry for {name}@{range})")]
    UnresolvedDependency {
        name: String,
        range: String,
        required_by: String,
    },

    // Input errors
    #[error("Failed to parse JSON input: {message}")]
    JsonParse { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for lockgraph operations
pub type LockgraphResult<T> = Result<T, LockgraphError>;

impl LockgraphError {
    /// Create an unresolved dependency error
    pub fn unresolved(name: &str, range: &str, required_by: &str) -> Self {
        Self::UnresolvedDependency {
            name: name.to_string(),
            range: range.to_string(),
            required_by: required_by.to_string(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LockgraphError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            LockgraphError::UnresolvedDependency { .. } => {
                Some("Regenerate the lockfile so every declared range has an entry")
            },
            LockgraphError::JsonParse { .. } => Some("Check the file for JSON syntax errors"),
            LockgraphError::Io { .. } => Some("Check that the file exists and is readable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_display_names_package_and_requirer() {
        let err = LockgraphError::unresolved("b", "^2.0.0", "a");
        assert_eq!(
            err.to_string(),
            "b not accessible from a (no lock entry for b@^2.0.0)"
        );
        assert!(!err.is_recoverable());
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_json_parse_display() {
        let err = LockgraphError::JsonParse {
            message: "expected value".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse JSON input: expected value");
    }

    #[test]
    fn test_io_error_is_recoverable() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = LockgraphError::io("Failed to read yarn.lock.json".to_string(), source);
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("yarn.lock.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
