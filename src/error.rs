//! Error types for Permatrix

use thiserror::Error;

/// The main error type for Permatrix operations
#[derive(Debug, Error)]
pub enum PermatrixError {
    /// A toggle or query named a module that is not in the static tree.
    /// Only reachable through a rendering or data-integrity defect.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    #[error("duplicate module id in tree: {0}")]
    DuplicateModule(String),

    #[error("cannot decode permissions: {0}")]
    Decode(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("failed to load group {group_id}: {source}")]
    Load {
        group_id: String,
        #[source]
        source: Box<PermatrixError>,
    },

    #[error("failed to save group {group_id}: {source}")]
    Save {
        group_id: String,
        #[source]
        source: Box<PermatrixError>,
    },

    #[error("backend returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP request error: {0}")]
    Http(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Permatrix operations
pub type Result<T> = std::result::Result<T, PermatrixError>;

/// Convert any transport error to PermatrixError
pub fn err<E: std::fmt::Display>(e: E) -> PermatrixError {
    PermatrixError::Http(e.to_string())
}
