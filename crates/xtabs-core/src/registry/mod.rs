//! Client registry: the ordered list of embedded windows with its focus and
//! scroll cursors.

pub mod clients;
pub mod errors;
pub mod types;

pub use clients::Registry;
pub use errors::RegistryError;
pub use types::{Bounds, Client, DEFAULT_NAME};
