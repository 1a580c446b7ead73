//! Configuration type definitions for xtabs.
//!
//! These types are deserialized from `~/.xtabs/config.toml`. Every section and
//! every field is optional; missing values fall back to the built-in defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! [window]
//! width = 1024
//! height = 768
//!
//! [bar]
//! tab_width = 120
//! font = "fixed"
//!
//! [colors]
//! focused_fg = "orange"
//!
//! [spawn]
//! command = "surf -e %w"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from the TOML config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct XtabsConfig {
    /// Initial container window geometry
    #[serde(default)]
    pub window: WindowConfig,

    /// Tab bar geometry and font
    #[serde(default)]
    pub bar: BarConfig,

    /// Tab bar colors
    #[serde(default)]
    pub colors: ColorConfig,

    /// Session file location
    #[serde(default)]
    pub session: SessionConfig,

    /// Command launched by the spawn key
    #[serde(default)]
    pub spawn: SpawnConfig,
}

/// Initial size of the container window.
///
/// The window manager is free to resize it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "super::defaults::default_window_width")]
    pub width: u16,

    #[serde(default = "super::defaults::default_window_height")]
    pub height: u16,
}

/// Tab bar configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    /// Fixed width of every tab in pixels.
    #[serde(default = "super::defaults::default_tab_width")]
    pub tab_width: u16,

    /// Core X11 font name used for tab labels.
    #[serde(default = "super::defaults::default_font")]
    pub font: String,

    /// Padding in pixels between the label and the tab border.
    #[serde(default = "super::defaults::default_font_padding")]
    pub font_padding: u16,
}

/// X11 color names for the two tab styles and the border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default = "super::defaults::default_normal_fg")]
    pub normal_fg: String,

    #[serde(default = "super::defaults::default_normal_bg")]
    pub normal_bg: String,

    #[serde(default = "super::defaults::default_focused_fg")]
    pub focused_fg: String,

    #[serde(default = "super::defaults::default_focused_bg")]
    pub focused_bg: String,

    #[serde(default = "super::defaults::default_border")]
    pub border: String,
}

/// Session file configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding session files. Defaults to `~/.xtabs`.
    /// A leading `~/` is expanded to the home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Session used when no name is given on the command line.
    #[serde(default = "super::defaults::default_session_name")]
    pub default_name: String,
}

/// Spawn key configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Shell-style command line. `%w` is replaced with the container window id.
    #[serde(default = "super::defaults::default_spawn_command")]
    pub command: String,
}
