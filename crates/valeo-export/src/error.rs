#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write output {path}: {message}")]
    OutputWrite { path: PathBuf, message: String },

    #[error("failed to read spreadsheet {path}: {message}")]
    SheetRead { path: PathBuf, message: String },

    #[error("spreadsheet {path} has no sheets")]
    EmptyWorkbook { path: PathBuf },
}

impl ExportError {
    pub(crate) fn write(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::OutputWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SheetRead {
            path: path.into(),
            message: message.into(),
        }
    }
}
