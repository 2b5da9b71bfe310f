//! Error types for descriptor validation and report handling.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for descriptor and report operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Extension module name is not a valid dotted identifier.
    #[error("invalid extension module name '{name}': expected dotted lowercase identifiers like 'bson._cbson'")]
    InvalidModuleName { name: String },

    /// Descriptor declares no source files.
    #[error("extension '{name}' declares no source files")]
    NoSources { name: String },

    /// A source or include path escapes the project root.
    #[error("unsafe path in extension '{name}': '{path}' must be relative and must not traverse upward")]
    UnsafePath { name: String, path: PathBuf },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Common trait for build-phase errors.
///
/// Implemented by backend error types so the CLI and reports can surface a
/// stable code and category without depending on the backend crate's enum.
pub trait BuildError: std::error::Error {
    /// Stable error code for reporting, e.g. "TOOLCHAIN_003".
    fn code(&self) -> &'static str;

    /// Human-readable message. Defaults to the `Display` rendering.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category for grouping, e.g. "toolchain".
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_error_display() {
        let err = SpecError::InvalidModuleName {
            name: "Bad Name".to_string(),
        };
        assert!(err.to_string().contains("Bad Name"));

        let err = SpecError::NoSources {
            name: "bson._cbson".to_string(),
        };
        assert!(err.to_string().contains("no source files"));
    }
}
