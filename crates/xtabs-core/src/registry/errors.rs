use crate::display::{DisplayError, WindowId};
use crate::errors::XtabsError;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Client index {index} out of bounds (size {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Window {window} is not embedded")]
    ClientNotFound { window: WindowId },

    #[error("Window {window} is already embedded")]
    DuplicateWindow { window: WindowId },

    #[error("No clients are embedded")]
    Empty,

    #[error(transparent)]
    Display(#[from] DisplayError),
}

impl XtabsError for RegistryError {
    fn error_code(&self) -> &'static str {
        match self {
            RegistryError::IndexOutOfBounds { .. } => "REGISTRY_INDEX_OUT_OF_BOUNDS",
            RegistryError::ClientNotFound { .. } => "REGISTRY_CLIENT_NOT_FOUND",
            RegistryError::DuplicateWindow { .. } => "REGISTRY_DUPLICATE_WINDOW",
            RegistryError::Empty => "REGISTRY_EMPTY",
            RegistryError::Display(e) => e.error_code(),
        }
    }
}
