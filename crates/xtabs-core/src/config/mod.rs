//! # Configuration System
//!
//! Optional TOML configuration for xtabs, read from `~/.xtabs/config.toml`
//! (or the path given with `--config`).
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.xtabs/config.toml
//! [bar]
//! tab_width = 120
//!
//! [colors]
//! focused_fg = "orange"
//!
//! [spawn]
//! command = "surf -e %w"
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use xtabs_core::config::XtabsConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = XtabsConfig::load(None)?;
//!     println!("tab width: {}", config.bar.tab_width);
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

use std::path::{Path, PathBuf};

pub use types::{BarConfig, ColorConfig, SessionConfig, SpawnConfig, WindowConfig, XtabsConfig};
pub use validation::{validate_config, validate_session_name};

impl XtabsConfig {
    /// Load configuration from `path`, or from the default location.
    ///
    /// See [`loading::load`] for details.
    pub fn load(path: Option<&Path>) -> Result<Self, crate::errors::ConfigError> {
        loading::load(path)
    }

    /// Directory holding session files.
    ///
    /// See [`loading::session_dir`] for details.
    pub fn session_dir(&self) -> Result<PathBuf, crate::errors::ConfigError> {
        loading::session_dir(self)
    }
}
