//! Startup, the main event loop, and teardown.

pub mod errors;

use std::io::Write;
use std::os::fd::AsFd;

use tracing::{info, warn};

use crate::config::{XtabsConfig, validate_session_name};
use crate::display::{DisplayEvent, DisplayGateway, X11Display};
use crate::errors::XtabsError;
use crate::events;
use crate::process::{Launcher, reap_children};
use crate::registry::Registry;
use crate::router::{Keymap, Router};
use crate::session::SessionStore;
use crate::signals::SignalWatcher;

pub use errors::RuntimeError;

/// Run xtabs until quit is requested by key or signal.
///
/// The container window id is written to stdout once the window exists.
pub fn run(config: &XtabsConfig, session_name: &str) -> Result<(), RuntimeError> {
    validate_session_name(session_name)?;
    let session_dir = config.session_dir()?;

    let signals = SignalWatcher::install()?;
    let mut display = X11Display::connect(config)?;
    let container = display.container();

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", container)
        .and_then(|_| stdout.flush())
        .map_err(|source| RuntimeError::AnnounceFailed { source })?;
    drop(stdout);

    let registry = Registry::new(display.metrics().tab_width, display.size().0);
    let session = SessionStore::new(session_dir, session_name);
    let launcher = Launcher::new(container, config.spawn.command.clone());
    let mut router = Router::new(registry, session, launcher, Keymap::default());

    events::log_app_startup(session_name, container);

    if let Err(e) = router.restore_session() {
        warn!(event = "core.runtime.restore_failed", error = %e);
    }

    let result = event_loop(&mut router, &mut display, &signals);

    events::log_app_shutdown(session_name, router.registry().len());
    router.teardown(&mut display);
    let closed = display.close();

    result?;
    closed?;
    info!(event = "core.runtime.stopped");
    Ok(())
}

fn event_loop(
    router: &mut Router,
    display: &mut X11Display,
    signals: &SignalWatcher,
) -> Result<(), RuntimeError> {
    loop {
        signals.drain_wakeups();
        if signals.take_child_exited() {
            reap_children();
        }
        if signals.quit_requested() {
            router.request_quit();
        }
        if router.quit_requested() {
            return Ok(());
        }

        match display.poll_event()? {
            Some(event) => dispatch(router, display, event)?,
            None => {
                display.flush()?;
                signals.wait(display.as_fd())?;
            }
        }
    }
}

/// Route one event and repaint if needed.
///
/// Handler failures are logged and the loop goes on, unless the display
/// connection itself is gone.
pub fn dispatch<D>(router: &mut Router, display: &mut D, event: DisplayEvent) -> Result<(), RuntimeError>
where
    D: DisplayGateway + ?Sized,
{
    let kind = event.kind();
    if let Err(e) = router.handle(event, display) {
        if e.is_fatal() {
            return Err(e.into());
        }
        warn!(
            event = "core.runtime.event_failed",
            kind,
            error = %e,
            error_code = e.error_code()
        );
    }

    if let Err(e) = router.redraw_if_needed(display) {
        if e.is_fatal() {
            return Err(e.into());
        }
        warn!(event = "core.runtime.redraw_failed", error = %e);
    }
    Ok(())
}
