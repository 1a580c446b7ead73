use crate::display::DisplayError;
use crate::errors::{ConfigError, XtabsError};
use crate::router::RouterError;
use crate::signals::SignalError;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("Failed to announce window id on stdout: {source}")]
    AnnounceFailed { source: std::io::Error },
}

impl XtabsError for RuntimeError {
    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Config(e) => e.error_code(),
            RuntimeError::Display(e) => e.error_code(),
            RuntimeError::Signal(e) => e.error_code(),
            RuntimeError::Router(e) => e.error_code(),
            RuntimeError::AnnounceFailed { .. } => "RUNTIME_ANNOUNCE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            RuntimeError::Config(e) => e.is_user_error(),
            RuntimeError::Display(e) => e.is_user_error(),
            RuntimeError::Router(e) => e.is_user_error(),
            RuntimeError::Signal(_) | RuntimeError::AnnounceFailed { .. } => false,
        }
    }
}
