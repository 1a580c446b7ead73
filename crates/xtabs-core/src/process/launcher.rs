use std::borrow::Cow;
use std::os::unix::process::CommandExt;
use std::process::Command;

use tracing::{error, info, warn};

use crate::display::WindowId;
use crate::process::errors::LaunchError;

/// Token replaced by the container window id when a command is launched.
pub const WINDOW_PLACEHOLDER: &str = "%w";

/// Split `command` into arguments and substitute the container window id for
/// every [`WINDOW_PLACEHOLDER`].
pub fn build_argv(command: &str, window_id: WindowId) -> Result<Vec<String>, LaunchError> {
    let words = shell_words::split(command).map_err(|e| LaunchError::ParseFailed {
        command: command.to_string(),
        message: e.to_string(),
    })?;
    if words.is_empty() {
        return Err(LaunchError::EmptyCommand);
    }

    let id = window_id.to_string();
    Ok(words
        .into_iter()
        .map(|word| word.replace(WINDOW_PLACEHOLDER, &id))
        .collect())
}

/// Turn an embedded program's `WM_COMMAND` back into a storable command line.
///
/// Arguments equal to the container window id become [`WINDOW_PLACEHOLDER`]
/// so a replayed session embeds into whichever container replays it.
/// Sessions hold one command per line, so an argument containing a line
/// break cannot be stored and yields `None`.
pub fn command_line(argv: &[String], window_id: WindowId) -> Option<String> {
    if argv.is_empty() {
        return None;
    }
    if argv.iter().any(|arg| arg.contains(['\n', '\r'])) {
        warn!(
            event = "core.process.command_unstorable",
            program = %argv[0],
            reason = "argument contains a line break"
        );
        return None;
    }
    let id = window_id.to_string();
    let words: Vec<Cow<'_, str>> = argv
        .iter()
        .map(|arg| {
            if *arg == id {
                Cow::Borrowed(WINDOW_PLACEHOLDER)
            } else {
                shell_words::quote(arg)
            }
        })
        .collect();
    Some(words.join(" "))
}

/// Starts programs that embed themselves into the container.
#[derive(Debug, Clone)]
pub struct Launcher {
    window_id: WindowId,
    default_command: String,
}

impl Launcher {
    pub fn new(window_id: WindowId, default_command: impl Into<String>) -> Self {
        Self {
            window_id,
            default_command: default_command.into(),
        }
    }

    /// Launch `command`, or the default command when `None`.
    ///
    /// The child runs in its own process group and is never waited on here;
    /// exited children are collected by [`crate::process::reap_children`].
    pub fn spawn(&self, command: Option<&str>) -> Result<u32, LaunchError> {
        let command = command.unwrap_or(&self.default_command);
        let argv = build_argv(command, self.window_id)?;
        let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;

        let child = Command::new(program)
            .args(args)
            .process_group(0)
            .spawn()
            .map_err(|source| {
                error!(
                    event = "core.process.spawn_failed",
                    program = %program,
                    error = %source
                );
                LaunchError::SpawnFailed {
                    program: program.clone(),
                    source,
                }
            })?;

        let pid = child.id();
        info!(
            event = "core.process.spawn_completed",
            pid,
            command = %command
        );
        Ok(pid)
    }
}
