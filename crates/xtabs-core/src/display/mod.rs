//! Display gateway: the seam between the tab logic and the display server.

pub mod errors;
pub mod traits;
pub mod types;
pub mod x11;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::DisplayError;
pub use traits::DisplayGateway;
pub use types::{BarMetrics, DisplayEvent, Pen, Rect, Surface, WindowId, WindowProperty};
pub use x11::X11Display;
