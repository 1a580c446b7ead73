//! Configuration validation.

use crate::config::types::XtabsConfig;
use crate::errors::ConfigError;

/// Largest accepted `bar.font_padding`, in pixels.
pub const MAX_FONT_PADDING: u16 = 64;

/// Validate a loaded configuration.
///
/// Checks geometry is non-zero, font padding is bounded, color names are present, the spawn command
/// splits into at least one word, and the default session name is usable as
/// a file name.
pub fn validate_config(config: &XtabsConfig) -> Result<(), ConfigError> {
    if config.window.width == 0 || config.window.height == 0 {
        return Err(ConfigError::invalid(
            "window.width and window.height must be greater than zero",
        ));
    }

    if config.bar.tab_width == 0 {
        return Err(ConfigError::invalid(
            "bar.tab_width must be greater than zero",
        ));
    }

    if config.bar.font_padding > MAX_FONT_PADDING {
        return Err(ConfigError::invalid(format!(
            "bar.font_padding must be at most {}",
            MAX_FONT_PADDING
        )));
    }

    if config.bar.font.trim().is_empty() {
        return Err(ConfigError::invalid("bar.font must not be empty"));
    }

    let colors = [
        ("normal_fg", &config.colors.normal_fg),
        ("normal_bg", &config.colors.normal_bg),
        ("focused_fg", &config.colors.focused_fg),
        ("focused_bg", &config.colors.focused_bg),
        ("border", &config.colors.border),
    ];
    for (key, value) in colors {
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(format!(
                "colors.{} must not be empty",
                key
            )));
        }
    }

    match shell_words::split(&config.spawn.command) {
        Ok(words) if !words.is_empty() => {}
        Ok(_) => return Err(ConfigError::invalid("spawn.command must not be empty")),
        Err(e) => {
            return Err(ConfigError::invalid(format!(
                "spawn.command is not a valid command line: {}",
                e
            )));
        }
    }

    validate_session_name(&config.session.default_name)
}

/// Check that a session name can be used as a file name inside the session directory.
pub fn validate_session_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(ConfigError::invalid(format!(
            "invalid session name '{}'",
            name
        )));
    }
    Ok(())
}
