// src/error.rs

//! Unified error handling for the uploader application.

use std::fmt;

use thiserror::Error;

/// Result type alias for uploader operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Neither server endpoint responded to the reachability probe
    #[error("No reachable Immich endpoint (tried {local} and {external})")]
    NetworkUnavailable { local: String, external: String },

    /// The configured album does not exist on the server
    #[error("Album '{0}' not found on server")]
    AlbumNotFound(String),

    /// Per-file upload error
    #[error("Upload error for {context}: {message}")]
    Upload { context: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an upload error with file context.
    pub fn upload(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Upload {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error aborts the run before any file is processed.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::NetworkUnavailable { .. } | AppError::AlbumNotFound(_)
        )
    }
}
