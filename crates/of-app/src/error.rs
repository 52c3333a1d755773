//! Error types for the of-app session layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the spec engine and the
/// filesystem and provides one error surface for frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Edit rejected: {0}")]
    Edit(#[from] of_spec::EditError),

    #[error("Preset error: {0}")]
    Preset(#[from] of_spec::PresetError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] of_spec::SerializeError),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported file format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid edit script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Preset not found: {0}")]
    PresetNotFound(String),
}

/// Result type for of-app operations.
pub type AppResult<T> = Result<T, AppError>;
