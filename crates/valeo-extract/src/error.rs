#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("unsupported document {path}: {message}")]
    UnsupportedDocument { path: PathBuf, message: String },

    #[error("invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ExtractError {
    pub(crate) fn unsupported(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::UnsupportedDocument {
            path: path.into(),
            message: message.into(),
        }
    }
}
