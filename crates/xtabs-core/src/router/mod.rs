//! Event routing: maps display events onto registry changes and commands.

pub mod errors;
pub mod handler;
pub mod keymap;

pub use errors::RouterError;
pub use handler::Router;
pub use keymap::{KeyCommand, Keymap, modifier_names};
