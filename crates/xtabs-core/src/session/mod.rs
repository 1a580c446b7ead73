//! Session files: one launch command per embedded window.

pub mod errors;
pub mod store;

pub use errors::SessionError;
pub use store::SessionStore;
