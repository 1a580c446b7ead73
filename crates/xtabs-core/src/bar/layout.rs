use crate::registry::Registry;

/// One tab placed in the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSlot {
    pub index: usize,
    pub x: i64,
    pub focused: bool,
}

/// Visible tabs for the current scroll offset, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarLayout {
    pub tabs: Vec<TabSlot>,
    /// Horizontal position just past the last placed tab, where the closing
    /// border line goes.
    pub end_x: i64,
}

impl BarLayout {
    /// Place tabs starting at the scroll offset while the running offset is
    /// still on screen. The last tab may be clipped at the right edge.
    pub fn compute(registry: &Registry) -> Self {
        let width = i64::from(registry.display_width());
        let tab_width = i64::from(registry.tab_width());

        let mut tabs = Vec::new();
        let mut x = 0;
        let mut index = registry.scroll_offset();
        while index < registry.len() && x <= width {
            tabs.push(TabSlot {
                index,
                x,
                focused: registry.is_focused(index),
            });
            x += tab_width;
            index += 1;
        }

        Self { tabs, end_x: x }
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
