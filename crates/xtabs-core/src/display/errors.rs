use crate::display::types::WindowId;
use crate::errors::XtabsError;

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Failed to connect to display: {message}")]
    ConnectFailed { message: String },

    #[error("Display connection lost: {message}")]
    ConnectionLost { message: String },

    #[error("Display request '{request}' failed: {message}")]
    RequestFailed {
        request: &'static str,
        message: String,
    },

    #[error("Failed to read {property} of window {window}: {message}")]
    PropertyUnreadable {
        window: WindowId,
        property: &'static str,
        message: String,
    },

    #[error("Color '{name}' could not be allocated")]
    ColorUnavailable { name: String },

    #[error("Font '{name}' could not be loaded")]
    FontUnavailable { name: String },

    #[error("Font '{font}' with padding {padding} makes the tab bar too tall")]
    BarTooTall { font: String, padding: u16 },
}

impl DisplayError {
    /// Whether the connection itself is unusable. Everything else is
    /// scoped to one request and the event loop can carry on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DisplayError::ConnectFailed { .. } | DisplayError::ConnectionLost { .. }
        )
    }

    pub fn request(request: &'static str, err: impl std::fmt::Display) -> Self {
        Self::RequestFailed {
            request,
            message: err.to_string(),
        }
    }
}

impl From<x11rb::errors::ConnectError> for DisplayError {
    fn from(err: x11rb::errors::ConnectError) -> Self {
        DisplayError::ConnectFailed {
            message: err.to_string(),
        }
    }
}

impl From<x11rb::errors::ConnectionError> for DisplayError {
    fn from(err: x11rb::errors::ConnectionError) -> Self {
        DisplayError::ConnectionLost {
            message: err.to_string(),
        }
    }
}

impl XtabsError for DisplayError {
    fn error_code(&self) -> &'static str {
        match self {
            DisplayError::ConnectFailed { .. } => "DISPLAY_CONNECT_FAILED",
            DisplayError::ConnectionLost { .. } => "DISPLAY_CONNECTION_LOST",
            DisplayError::RequestFailed { .. } => "DISPLAY_REQUEST_FAILED",
            DisplayError::PropertyUnreadable { .. } => "DISPLAY_PROPERTY_UNREADABLE",
            DisplayError::ColorUnavailable { .. } => "DISPLAY_COLOR_UNAVAILABLE",
            DisplayError::FontUnavailable { .. } => "DISPLAY_FONT_UNAVAILABLE",
            DisplayError::BarTooTall { .. } => "DISPLAY_BAR_TOO_TALL",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            DisplayError::ConnectFailed { .. }
                | DisplayError::ColorUnavailable { .. }
                | DisplayError::FontUnavailable { .. }
                | DisplayError::BarTooTall { .. }
        )
    }
}
