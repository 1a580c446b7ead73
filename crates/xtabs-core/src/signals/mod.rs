//! Signal notifications consumed by the main loop.
//!
//! Handlers only flip atomic flags and write a byte to a wake-up socket. All
//! real work (reaping, teardown) happens on the main thread.

use std::io::{self, ErrorKind, Read};
use std::os::fd::{AsFd, BorrowedFd};
use std::os::unix::net::UnixStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use signal_hook::SigId;
use signal_hook::consts::{SIGCHLD, SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use tracing::{debug, info};

/// Signals that request a clean shutdown.
pub const QUIT_SIGNALS: [i32; 4] = [SIGHUP, SIGINT, SIGQUIT, SIGTERM];

#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("Failed to install handler for signal {signal}: {source}")]
    InstallFailed { signal: i32, source: io::Error },

    #[error("Failed to create wake-up socket: {source}")]
    WakeupFailed { source: io::Error },

    #[error("Failed to wait for events: {source}")]
    PollFailed { source: Errno },
}

impl crate::errors::XtabsError for SignalError {
    fn error_code(&self) -> &'static str {
        match self {
            SignalError::InstallFailed { .. } => "SIGNAL_INSTALL_FAILED",
            SignalError::WakeupFailed { .. } => "SIGNAL_WAKEUP_FAILED",
            SignalError::PollFailed { .. } => "SIGNAL_POLL_FAILED",
        }
    }
}

/// Owns the installed handlers. Dropping it unregisters them.
pub struct SignalWatcher {
    quit: Arc<AtomicBool>,
    child_exited: Arc<AtomicBool>,
    wakeup: UnixStream,
    ids: Vec<SigId>,
}

impl SignalWatcher {
    pub fn install() -> Result<Self, SignalError> {
        let (wakeup, notify) =
            UnixStream::pair().map_err(|source| SignalError::WakeupFailed { source })?;
        wakeup
            .set_nonblocking(true)
            .map_err(|source| SignalError::WakeupFailed { source })?;
        notify
            .set_nonblocking(true)
            .map_err(|source| SignalError::WakeupFailed { source })?;

        let mut watcher = Self {
            quit: Arc::new(AtomicBool::new(false)),
            child_exited: Arc::new(AtomicBool::new(false)),
            wakeup,
            ids: Vec::new(),
        };

        for signal in QUIT_SIGNALS {
            let flag = Arc::clone(&watcher.quit);
            watcher.register(signal, flag, &notify)?;
        }
        let flag = Arc::clone(&watcher.child_exited);
        watcher.register(SIGCHLD, flag, &notify)?;

        debug!(
            event = "core.signals.install_completed",
            handlers = watcher.ids.len()
        );
        Ok(watcher)
    }

    fn register(
        &mut self,
        signal: i32,
        flag: Arc<AtomicBool>,
        notify: &UnixStream,
    ) -> Result<(), SignalError> {
        let install_failed = |source| SignalError::InstallFailed { signal, source };

        self.ids
            .push(signal_hook::flag::register(signal, flag).map_err(install_failed)?);
        let pipe = notify.try_clone().map_err(install_failed)?;
        self.ids
            .push(signal_hook::low_level::pipe::register(signal, pipe).map_err(install_failed)?);
        Ok(())
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }

    /// Whether SIGCHLD arrived since the last call.
    pub fn take_child_exited(&self) -> bool {
        self.child_exited.swap(false, Ordering::SeqCst)
    }

    /// Empty the wake-up socket so the next `wait` blocks again.
    pub fn drain_wakeups(&self) {
        let mut buf = [0u8; 64];
        loop {
            match (&self.wakeup).read(&mut buf) {
                Ok(0) => break,
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    }

    /// Block until `display` is readable or a signal arrives.
    pub fn wait(&self, display: BorrowedFd<'_>) -> Result<(), SignalError> {
        let mut fds = [
            PollFd::new(display, PollFlags::POLLIN),
            PollFd::new(self.wakeup.as_fd(), PollFlags::POLLIN),
        ];
        match poll(&mut fds, PollTimeout::NONE) {
            Ok(_) | Err(Errno::EINTR) => Ok(()),
            Err(source) => Err(SignalError::PollFailed { source }),
        }
    }
}

impl Drop for SignalWatcher {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
        info!(event = "core.signals.handlers_removed");
    }
}
