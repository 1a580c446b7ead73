//! Default implementations for configuration types.
//!
//! The values mirror what a bare X session provides: the core `fixed` font,
//! named colors from the server's color database and `xterm` as the program
//! launched into new tabs.

use crate::config::types::{BarConfig, ColorConfig, SessionConfig, SpawnConfig, WindowConfig};

pub fn default_window_width() -> u16 {
    640
}

pub fn default_window_height() -> u16 {
    480
}

pub fn default_tab_width() -> u16 {
    100
}

pub fn default_font() -> String {
    "fixed".to_string()
}

pub fn default_font_padding() -> u16 {
    1
}

pub fn default_normal_fg() -> String {
    "gray60".to_string()
}

pub fn default_normal_bg() -> String {
    "gray9".to_string()
}

pub fn default_focused_fg() -> String {
    "red".to_string()
}

pub fn default_focused_bg() -> String {
    "black".to_string()
}

pub fn default_border() -> String {
    "black".to_string()
}

pub fn default_session_name() -> String {
    "default".to_string()
}

/// Returns the default spawn command.
///
/// `xterm -into <id>` reparents the terminal into the given window, which is
/// exactly the embedding request the container listens for.
pub fn default_spawn_command() -> String {
    "xterm -into %w".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
            font: default_font(),
            font_padding: default_font_padding(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            normal_fg: default_normal_fg(),
            normal_bg: default_normal_bg(),
            focused_fg: default_focused_fg(),
            focused_bg: default_focused_bg(),
            border: default_border(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: None,
            default_name: default_session_name(),
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            command: default_spawn_command(),
        }
    }
}
