//! Publish error types.

use std::path::PathBuf;

/// Errors that can occur while binding or publishing a build target.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// No credential could be found for the publishing step.
    #[error("missing credential: nothing found in {source_desc}")]
    MissingCredential { source_desc: String },

    /// Pre-publish validation failed.
    #[error("publish failed: {detail}")]
    NotReady { detail: String },

    /// This plugin version has already been staged.
    #[error("plugin '{name}@{version}' already staged")]
    AlreadyStaged { name: String, version: String },

    /// Staging directory error.
    #[error("staging error at {path}: {detail}")]
    Staging { path: PathBuf, detail: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;
