//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Model parsing error.
    #[error("model parse error: {0}")]
    Parse(#[from] swiftgen_model::ParseError),

    /// A package directory could not be created.
    #[error("failed to create directory '{}': {source}", .path.display())]
    DirectoryCreation {
        /// Directory path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A generated file could not be written.
    #[error("failed to write '{}': {source}", .path.display())]
    FileWrite {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Option set could not be parsed.
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Creates a directory creation error.
    pub fn directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}
