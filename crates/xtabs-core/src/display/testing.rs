//! Recording display gateway for unit tests.

use std::collections::{HashMap, VecDeque};

use crate::display::errors::DisplayError;
use crate::display::traits::DisplayGateway;
use crate::display::types::{BarMetrics, DisplayEvent, Pen, Rect, Surface, WindowId};

/// One gateway request, as seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetSize(u16, u16),
    Embed(WindowId),
    Resize(WindowId, u16, u16),
    Raise(WindowId),
    Kill(WindowId),
    SetContainerName(String),
    FillRect(Surface, Pen, Rect),
    StrokeRect(Surface, Pen, Rect),
    DrawText(Surface, Pen, i16, i16, String),
    DrawLine(Surface, Pen, (i16, i16), (i16, i16)),
    CopyArea(Surface, Surface, (i16, i16), (i16, i16), u16, u16),
    Flush,
}

pub const CONTAINER: WindowId = 1;

/// Fake gateway that records every request and serves canned properties.
///
/// Text is measured at a fixed six pixels per character.
pub struct RecordingDisplay {
    pub calls: Vec<Call>,
    pub names: HashMap<WindowId, String>,
    pub commands: HashMap<WindowId, Vec<String>>,
    pub unreadable: Vec<WindowId>,
    pub events: VecDeque<DisplayEvent>,
    metrics: BarMetrics,
    width: u16,
    height: u16,
}

impl RecordingDisplay {
    pub fn new(width: u16, height: u16, tab_width: u16) -> Self {
        Self {
            calls: Vec::new(),
            names: HashMap::new(),
            commands: HashMap::new(),
            unreadable: Vec::new(),
            events: VecDeque::new(),
            metrics: BarMetrics::from_font(11, 2, 1, tab_width).unwrap(),
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn raised(&self) -> Vec<WindowId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Raise(w) => Some(*w),
                _ => None,
            })
            .collect()
    }

    pub fn container_name(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::SetContainerName(name) => Some(name.as_str()),
            _ => None,
        })
    }

    fn check(&self, window: WindowId, property: &'static str) -> Result<(), DisplayError> {
        if self.unreadable.contains(&window) {
            return Err(DisplayError::PropertyUnreadable {
                window,
                property,
                message: "BadWindow".to_string(),
            });
        }
        Ok(())
    }
}

impl DisplayGateway for RecordingDisplay {
    fn container(&self) -> WindowId {
        CONTAINER
    }

    fn metrics(&self) -> BarMetrics {
        self.metrics
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u16, height: u16) -> Result<(), DisplayError> {
        self.width = width;
        self.height = height;
        self.calls.push(Call::SetSize(width, height));
        Ok(())
    }

    fn embed_window(&mut self, window: WindowId) -> Result<(), DisplayError> {
        self.calls.push(Call::Embed(window));
        Ok(())
    }

    fn resize_window(
        &mut self,
        window: WindowId,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        self.calls.push(Call::Resize(window, width, height));
        Ok(())
    }

    fn raise_window(&mut self, window: WindowId) -> Result<(), DisplayError> {
        self.calls.push(Call::Raise(window));
        Ok(())
    }

    fn kill_window(&mut self, window: WindowId) -> Result<(), DisplayError> {
        self.calls.push(Call::Kill(window));
        Ok(())
    }

    fn set_container_name(&mut self, name: &str) -> Result<(), DisplayError> {
        self.calls.push(Call::SetContainerName(name.to_string()));
        Ok(())
    }

    fn window_name(&mut self, window: WindowId) -> Result<Option<String>, DisplayError> {
        self.check(window, "WM_NAME")?;
        Ok(self.names.get(&window).cloned())
    }

    fn window_command(&mut self, window: WindowId) -> Result<Option<Vec<String>>, DisplayError> {
        self.check(window, "WM_COMMAND")?;
        Ok(self.commands.get(&window).cloned())
    }

    fn text_width(&mut self, text: &str) -> Result<i32, DisplayError> {
        Ok(text.chars().count() as i32 * 6)
    }

    fn fill_rect(&mut self, surface: Surface, pen: Pen, rect: Rect) -> Result<(), DisplayError> {
        self.calls.push(Call::FillRect(surface, pen, rect));
        Ok(())
    }

    fn stroke_rect(&mut self, surface: Surface, pen: Pen, rect: Rect) -> Result<(), DisplayError> {
        self.calls.push(Call::StrokeRect(surface, pen, rect));
        Ok(())
    }

    fn draw_text(
        &mut self,
        surface: Surface,
        pen: Pen,
        x: i16,
        y: i16,
        text: &str,
    ) -> Result<(), DisplayError> {
        self.calls
            .push(Call::DrawText(surface, pen, x, y, text.to_string()));
        Ok(())
    }

    fn draw_line(
        &mut self,
        surface: Surface,
        pen: Pen,
        from: (i16, i16),
        to: (i16, i16),
    ) -> Result<(), DisplayError> {
        self.calls.push(Call::DrawLine(surface, pen, from, to));
        Ok(())
    }

    fn copy_area(
        &mut self,
        src: Surface,
        dst: Surface,
        src_origin: (i16, i16),
        dst_origin: (i16, i16),
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        self.calls.push(Call::CopyArea(
            src, dst, src_origin, dst_origin, width, height,
        ));
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<DisplayEvent>, DisplayError> {
        Ok(self.events.pop_front())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.calls.push(Call::Flush);
        Ok(())
    }
}
