use crate::display::WindowId;

/// Label shown for clients that have not advertised a name.
pub const DEFAULT_NAME: &str = "(no name)";

/// One embedded window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    window: WindowId,
    name: Option<String>,
    command: Option<String>,
}

impl Client {
    pub fn new(window: WindowId) -> Self {
        Self {
            window,
            name: None,
            command: None,
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name, or [`DEFAULT_NAME`] when none was advertised.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn set_command(&mut self, command: Option<String>) {
        self.command = command;
    }
}

/// Horizontal span of a tab in the bar, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub start: i64,
    pub end: i64,
}

impl Bounds {
    /// Whether the whole span lies within `[0, width]`.
    pub fn fits_within(&self, width: i64) -> bool {
        self.start >= 0 && self.end <= width
    }

    pub fn contains(&self, x: i64) -> bool {
        x >= self.start && x < self.end
    }
}
