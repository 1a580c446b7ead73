//! Display gateway trait definition.

use crate::display::errors::DisplayError;
use crate::display::types::{BarMetrics, DisplayEvent, Pen, Rect, Surface, WindowId};

/// Everything the registry, router and bar renderer need from the display server.
///
/// The X11 implementation lives in [`crate::display::x11`]. Tests use a
/// recording fake so the tab logic runs without a server.
pub trait DisplayGateway {
    /// The container window hosting the bar and all embedded windows.
    fn container(&self) -> WindowId;

    /// Fixed bar geometry.
    fn metrics(&self) -> BarMetrics;

    /// Current container size as `(width, height)`.
    fn size(&self) -> (u16, u16);

    /// Record a new container size and recreate the bar surface to match.
    fn set_size(&mut self, width: u16, height: u16) -> Result<(), DisplayError>;

    /// Reparent `window` into the container below the bar, map it, and
    /// subscribe to its property changes.
    fn embed_window(&mut self, window: WindowId) -> Result<(), DisplayError>;

    fn resize_window(&mut self, window: WindowId, width: u16, height: u16)
    -> Result<(), DisplayError>;

    /// Stack `window` above its siblings.
    fn raise_window(&mut self, window: WindowId) -> Result<(), DisplayError>;

    /// Ask the server to disconnect the client owning `window`.
    fn kill_window(&mut self, window: WindowId) -> Result<(), DisplayError>;

    /// Set the title advertised by the container window.
    fn set_container_name(&mut self, name: &str) -> Result<(), DisplayError>;

    /// Read `WM_NAME` of `window`. `None` when unset or empty.
    fn window_name(&mut self, window: WindowId) -> Result<Option<String>, DisplayError>;

    /// Read `WM_COMMAND` of `window` as its argument list. `None` when unset.
    fn window_command(&mut self, window: WindowId) -> Result<Option<Vec<String>>, DisplayError>;

    /// Rendered width of `text` in the bar font, in pixels.
    fn text_width(&mut self, text: &str) -> Result<i32, DisplayError>;

    fn fill_rect(&mut self, surface: Surface, pen: Pen, rect: Rect) -> Result<(), DisplayError>;

    fn stroke_rect(&mut self, surface: Surface, pen: Pen, rect: Rect) -> Result<(), DisplayError>;

    /// Draw `text` with its baseline at `y`.
    fn draw_text(
        &mut self,
        surface: Surface,
        pen: Pen,
        x: i16,
        y: i16,
        text: &str,
    ) -> Result<(), DisplayError>;

    fn draw_line(
        &mut self,
        surface: Surface,
        pen: Pen,
        from: (i16, i16),
        to: (i16, i16),
    ) -> Result<(), DisplayError>;

    /// Copy the `width` x `height` area at `src_origin` of `src` to `dst_origin` of `dst`.
    fn copy_area(
        &mut self,
        src: Surface,
        dst: Surface,
        src_origin: (i16, i16),
        dst_origin: (i16, i16),
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError>;

    /// Next queued event, without blocking.
    fn poll_event(&mut self) -> Result<Option<DisplayEvent>, DisplayError>;

    /// Push buffered requests to the server.
    fn flush(&mut self) -> Result<(), DisplayError>;
}
