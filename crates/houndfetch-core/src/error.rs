//! Error types for houndfetch-core.

use thiserror::Error;

/// Errors that abort a render pass.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The logo document violates the `#accent c<N>` + raster shape.
    #[error("Malformed logo: {0}")]
    MalformedLogo(String),

    /// IO error while reading a logo document or configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field key that is not part of the fixed field set.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// A collaborator could not supply a value for a field.
///
/// Never fatal: the field renders `n/a` in place and the pass continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{what} unavailable: {reason}")]
pub struct FieldDataUnavailable {
    /// Which raw value was requested (e.g. `"kernel"`).
    pub what: &'static str,
    /// Human-readable cause.
    pub reason: String,
}

impl FieldDataUnavailable {
    /// Create a new unavailable marker.
    pub fn new(what: &'static str, reason: impl Into<String>) -> Self {
        Self {
            what,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_malformed_logo() {
        let err = FetchError::MalformedLogo("missing accent directive".to_string());
        assert!(err.to_string().contains("Malformed logo"));
        assert!(err.to_string().contains("missing accent directive"));
    }

    #[test]
    fn test_fetch_error_io_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "logo.txt");
        let err: FetchError = io_err.into();
        assert!(matches!(err, FetchError::Io(_)));
        assert!(err.to_string().contains("IO error"));
        assert!(err.to_string().contains("logo.txt"));
    }

    #[test]
    fn test_fetch_error_unknown_field() {
        let err = FetchError::UnknownField("battery".to_string());
        assert_eq!(err.to_string(), "Unknown field: battery");
    }

    #[test]
    fn test_field_data_unavailable_display() {
        let err = FieldDataUnavailable::new("kernel", "uname failed");
        assert_eq!(err.to_string(), "kernel unavailable: uname failed");
        assert_eq!(err.what, "kernel");
    }

    #[test]
    fn test_field_data_unavailable_clone_eq() {
        let err = FieldDataUnavailable::new("gpus", "lspci missing");
        assert_eq!(err.clone(), err);
    }
}
