use std::path::PathBuf;

use crate::errors::XtabsError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to read session file '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write session file '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create session directory '{}': {source}", path.display())]
    DirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl XtabsError for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::ReadFailed { .. } => "SESSION_READ_FAILED",
            SessionError::WriteFailed { .. } => "SESSION_WRITE_FAILED",
            SessionError::DirectoryFailed { .. } => "SESSION_DIRECTORY_FAILED",
        }
    }
}
