//! Launching embedded programs and reaping them when they exit.

pub mod errors;
pub mod launcher;
pub mod reaper;

pub use errors::LaunchError;
pub use launcher::{Launcher, WINDOW_PLACEHOLDER, build_argv, command_line};
pub use reaper::reap_children;
