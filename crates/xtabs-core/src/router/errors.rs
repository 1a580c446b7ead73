use crate::display::DisplayError;
use crate::errors::XtabsError;
use crate::process::LaunchError;
use crate::registry::RegistryError;
use crate::session::SessionError;

/// Failure while handling one event.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}

impl RouterError {
    /// Whether the event loop cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        match self {
            RouterError::Display(e) => e.is_fatal(),
            RouterError::Registry(RegistryError::Display(e)) => e.is_fatal(),
            _ => false,
        }
    }
}

impl XtabsError for RouterError {
    fn error_code(&self) -> &'static str {
        match self {
            RouterError::Registry(e) => e.error_code(),
            RouterError::Display(e) => e.error_code(),
            RouterError::Session(e) => e.error_code(),
            RouterError::Launch(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            RouterError::Registry(e) => e.is_user_error(),
            RouterError::Display(e) => e.is_user_error(),
            RouterError::Session(e) => e.is_user_error(),
            RouterError::Launch(e) => e.is_user_error(),
        }
    }
}
