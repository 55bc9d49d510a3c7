//! All error types for the langswitch crate.
//!
//! Only misconfiguration and I/O surface as errors. Missing translations,
//! missing bundles and unparseable numerals are recovered from silently.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The default language was read before it was ever set.
    #[error("default language was not set")]
    DefaultLanguageNotSet,

    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid bundle: {0}")]
    InvalidBundle(String),

    #[error("storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a new storage error with optional source error
    pub fn storage_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Storage {
            message: message.into(),
            source,
        }
    }

    /// Whether this error is the misconfiguration case callers must not recover from.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, Error::DefaultLanguageNotSet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_default_language_not_set_error() {
        let error = Error::DefaultLanguageNotSet;
        assert_eq!(error.to_string(), "default language was not set");
        assert!(error.is_misconfiguration());
    }

    #[test]
    fn test_unknown_language_error() {
        let error = Error::UnknownLanguage("xx".to_string());
        assert_eq!(error.to_string(), "unknown language `xx`");
        assert!(!error.is_misconfiguration());
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_parse_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::Parse(json_error);
        assert!(error.to_string().contains("parse error"));
    }

    #[test]
    fn test_storage_error_with_source() {
        let source_error = Box::new(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let error = Error::storage_error("write failed", Some(source_error));
        assert_eq!(error.to_string(), "storage error: write failed");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidBundle("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidBundle"));
        assert!(debug.contains("test"));
    }
}
