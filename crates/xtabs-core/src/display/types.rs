/// X11 window identifier.
pub type WindowId = u32;

/// Window properties the router reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowProperty {
    /// `WM_NAME`, shown as the tab label.
    Name,
    /// `WM_COMMAND`, recorded for session persistence.
    Command,
    /// Any other atom.
    Other,
}

/// Display-server events, already decoded from the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// Part of the container needs repainting.
    Expose,
    KeyPress {
        keycode: u8,
        modifiers: u16,
    },
    /// Coordinates are relative to the container window.
    ButtonPress {
        x: i16,
        y: i16,
        button: u8,
    },
    ConfigureNotify {
        window: WindowId,
        width: u16,
        height: u16,
    },
    CreateNotify {
        window: WindowId,
    },
    DestroyNotify {
        window: WindowId,
    },
    PropertyNotify {
        window: WindowId,
        property: WindowProperty,
    },
    /// An event kind the router has no handler for.
    Unhandled,
}

impl DisplayEvent {
    /// Short name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            DisplayEvent::Expose => "expose",
            DisplayEvent::KeyPress { .. } => "key_press",
            DisplayEvent::ButtonPress { .. } => "button_press",
            DisplayEvent::ConfigureNotify { .. } => "configure_notify",
            DisplayEvent::CreateNotify { .. } => "create_notify",
            DisplayEvent::DestroyNotify { .. } => "destroy_notify",
            DisplayEvent::PropertyNotify { .. } => "property_notify",
            DisplayEvent::Unhandled => "unhandled",
        }
    }
}

/// Drawing targets owned by the display gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Off-screen strip as wide as the container.
    Bar,
    /// Off-screen scratch area the size of one tab.
    Tab,
    /// The container window itself.
    Container,
}

/// Graphics contexts used by the bar renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pen {
    NormalFg,
    NormalBg,
    FocusedFg,
    FocusedBg,
    Border,
}

impl Pen {
    /// Foreground and background pens for a tab.
    pub fn for_tab(focused: bool) -> (Pen, Pen) {
        if focused {
            (Pen::FocusedFg, Pen::FocusedBg)
        } else {
            (Pen::NormalFg, Pen::NormalBg)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Fixed geometry of the tab bar, derived from the loaded font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarMetrics {
    pub bar_height: u16,
    pub tab_width: u16,
    pub font_ascent: u16,
    pub font_descent: u16,
    pub font_padding: u16,
}

impl BarMetrics {
    /// Bar height is the font height plus padding on both sides and a one
    /// pixel border top and bottom.
    ///
    /// Returns `None` when the height does not fit a signed window coordinate.
    pub fn from_font(
        font_ascent: u16,
        font_descent: u16,
        font_padding: u16,
        tab_width: u16,
    ) -> Option<Self> {
        let bar_height = font_padding
            .checked_mul(2)?
            .checked_add(font_ascent)?
            .checked_add(font_descent)?
            .checked_add(2)?;
        if bar_height > i16::MAX as u16 {
            return None;
        }
        Some(Self {
            bar_height,
            tab_width,
            font_ascent,
            font_descent,
            font_padding,
        })
    }

    /// Horizontal position of the first label glyph inside a tab.
    pub fn text_x(&self) -> i16 {
        (self.font_padding + 1) as i16
    }

    /// Baseline of label text inside a tab.
    pub fn text_baseline(&self) -> i16 {
        self.bar_height as i16 - (self.font_descent + self.font_padding + 1) as i16
    }
}
