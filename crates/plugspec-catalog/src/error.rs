//! Error types for catalog operations.

use std::path::PathBuf;

/// Errors that can occur while building or loading a platform catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading catalog files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file not found.
    #[error("catalog file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The same platform type appears twice in one set of entries.
    #[error("duplicate platform type '{code}'")]
    DuplicatePlatform {
        /// The repeated type code.
        code: String,
    },

    /// Validation error in a platform entry.
    #[error("validation error: {detail}")]
    Validation {
        /// Description of the validation failure.
        detail: String,
    },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
