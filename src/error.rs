//! Error types for Vigil
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Vigil operations
pub type VigilResult<T> = Result<T, VigilError>;

/// Main error type for Vigil operations
#[derive(Error, Debug)]
pub enum VigilError {
    /// Watch path missing or not a directory
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// The action command could not be launched at all
    #[error("failed to launch action '{action}': {message}")]
    ActionLaunch { action: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
