//! Lifecycle events shared by the runtime and the CLI.

use tracing::{error, info, warn};

use crate::display::WindowId;
use crate::errors::XtabsError;

/// The container exists and the session is about to be restored.
pub fn log_app_startup(session: &str, container: WindowId) {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        session,
        container
    );
}

/// The event loop ended; `clients` are still embedded and about to be closed.
pub fn log_app_shutdown(session: &str, clients: usize) {
    info!(event = "core.app.shutdown_started", session, clients);
}

/// User errors (bad config, missing font) log as warnings.
pub fn log_app_error(error: &dyn XtabsError) {
    if error.is_user_error() {
        warn!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code(),
            user_error = true
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code(),
            user_error = false
        );
    }
}
