//! # Content Loading Errors

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for content operations
pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Content directory not found: {0}")]
    MissingRoot(PathBuf),

    #[error("Invalid front matter in {path}: {reason}")]
    FrontMatter { path: PathBuf, reason: String },

    #[error("{path}: {source}")]
    Validation {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
}

impl ContentError {
    /// Stable code string for reports
    pub fn code(&self) -> &'static str {
        match self {
            ContentError::Io { .. } => "CONTENT_IO_ERROR",
            ContentError::MissingRoot(_) => "CONTENT_MISSING_ROOT",
            ContentError::FrontMatter { .. } => "CONTENT_FRONT_MATTER_INVALID",
            ContentError::Validation { source, .. } => source.code().code(),
        }
    }
}
