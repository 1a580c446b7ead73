//! xtabs-core: Core library for the xtabs tabbed window-embedding shell
//!
//! Top-level X11 windows launched into the container are embedded as tabs
//! below a tab bar. This crate holds everything except argument parsing.
//!
//! # Main Entry Points
//!
//! - [`registry`] - Ordered embedded windows with focus and scroll cursors
//! - [`router`] - Display event dispatch and key commands
//! - [`bar`] - Tab bar layout and painting
//! - [`display`] - Display gateway trait and the X11 implementation
//! - [`runtime`] - Startup, event loop and teardown

pub mod bar;
pub mod config;
pub mod display;
pub mod errors;
pub mod events;
pub mod logging;
pub mod process;
pub mod registry;
pub mod router;
pub mod runtime;
pub mod session;
pub mod signals;

// Re-export commonly used types at crate root for convenience
pub use config::XtabsConfig;
pub use display::{DisplayError, DisplayEvent, DisplayGateway, WindowId, X11Display};
pub use errors::{ConfigError, XtabsError};
pub use registry::{Client, Registry, RegistryError};
pub use router::{KeyCommand, Keymap, Router, RouterError};
pub use runtime::{RuntimeError, run};
pub use session::{SessionError, SessionStore};

// Re-export logging initialization
pub use logging::init_logging;
