//! Tab bar layout and painting.

pub mod layout;
pub mod render;

pub use layout::{BarLayout, TabSlot};
pub use render::draw_bar;
