//! Error types for the license bundler.
//!
//! Library crates use [`LicenseBundleError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all license bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum LicenseBundleError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The dependency manifest could not be parsed into the expected shape.
    #[error("manifest error in {path:?}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// A manifest record failed field validation.
    #[error("validation error in record {index}: {message}")]
    Validation { index: usize, message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LicenseBundleError>;

impl LicenseBundleError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a manifest error for the given file.
    pub fn manifest(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error for the manifest record at `index`.
    pub fn validation(index: usize, msg: impl Into<String>) -> Self {
        Self::Validation {
            index,
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = LicenseBundleError::config("could not determine home directory");
        assert_eq!(
            err.to_string(),
            "config error: could not determine home directory"
        );

        let err = LicenseBundleError::validation(3, "`name` must not be empty");
        assert_eq!(
            err.to_string(),
            "validation error in record 3: `name` must not be empty"
        );
        assert!(matches!(err, LicenseBundleError::Validation { index: 3, .. }));

        let err = LicenseBundleError::manifest("licenses.json", "expected a JSON array");
        let msg = err.to_string();
        assert!(msg.contains("licenses.json"));
        assert!(msg.contains("expected a JSON array"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = LicenseBundleError::io("/tmp/missing/LICENSE", source);
        assert!(err.to_string().contains("/tmp/missing/LICENSE"));
        assert!(err.to_string().contains("gone"));
    }
}
