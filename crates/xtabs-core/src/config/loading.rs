//! Configuration loading.
//!
//! The config file is optional: a missing file yields the defaults, while a
//! file that exists but fails to parse or validate is an error.

use crate::config::types::XtabsConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Base directory for xtabs data (`~/.xtabs`).
pub fn xtabs_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    Ok(home.join(".xtabs"))
}

/// Default location of the user config file (`~/.xtabs/config.toml`).
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(xtabs_dir()?.join("config.toml"))
}

/// Load the user configuration, falling back to defaults when the file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed, or validated.
pub fn load(path: Option<&Path>) -> Result<XtabsConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    let config = match fs::read_to_string(&path) {
        Ok(content) => {
            info!(event = "core.config.load_started", path = %path.display());
            parse(&content, &path)?
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(event = "core.config.file_not_found", path = %path.display());
            XtabsConfig::default()
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    validate_config(&config)?;
    Ok(config)
}

fn parse(content: &str, path: &Path) -> Result<XtabsConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Resolve the directory that holds session files.
///
/// A configured directory starting with `~/` is expanded to the home directory.
pub fn session_dir(config: &XtabsConfig) -> Result<PathBuf, ConfigError> {
    match &config.session.dir {
        Some(dir) => match dir.strip_prefix("~") {
            Ok(rest) => {
                let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
                Ok(home.join(rest))
            }
            Err(_) => Ok(dir.clone()),
        },
        None => xtabs_dir(),
    }
}
