use std::mem;

use tracing::{debug, info};

use crate::display::{DisplayGateway, WindowId};
use crate::registry::errors::RegistryError;
use crate::registry::types::{Bounds, Client};

/// Initial number of client slots; the vector grows geometrically beyond it.
const INITIAL_CAPACITY: usize = 100;

/// Ordered list of embedded windows.
///
/// Order is arrival order and is also the tab display order. `focus` always
/// indexes a live client while the list is non-empty, and `scroll_offset` is
/// kept such that the focused tab lies fully inside `[0, display_width]`
/// whenever a tab fits on screen at all.
#[derive(Debug)]
pub struct Registry {
    clients: Vec<Client>,
    focus: usize,
    scroll_offset: usize,
    tab_width: u16,
    display_width: u16,
    redraw: bool,
}

impl Registry {
    pub fn new(tab_width: u16, display_width: u16) -> Self {
        Self {
            clients: Vec::with_capacity(INITIAL_CAPACITY),
            focus: 0,
            scroll_offset: 0,
            tab_width,
            display_width,
            redraw: true,
        }
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Index of the focused client, `None` when the registry is empty.
    pub fn focus(&self) -> Option<usize> {
        if self.clients.is_empty() {
            None
        } else {
            Some(self.focus)
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn tab_width(&self) -> u16 {
        self.tab_width
    }

    pub fn display_width(&self) -> u16 {
        self.display_width
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn index_of(&self, window: WindowId) -> Option<usize> {
        self.clients.iter().position(|c| c.window() == window)
    }

    pub fn is_focused(&self, index: usize) -> bool {
        !self.clients.is_empty() && index == self.focus
    }

    pub fn client(&self, index: usize) -> Result<&Client, RegistryError> {
        self.clients
            .get(index)
            .ok_or(RegistryError::IndexOutOfBounds {
                index,
                size: self.clients.len(),
            })
    }

    fn client_mut(&mut self, index: usize) -> Result<&mut Client, RegistryError> {
        let size = self.clients.len();
        self.clients
            .get_mut(index)
            .ok_or(RegistryError::IndexOutOfBounds { index, size })
    }

    pub fn window(&self, index: usize) -> Result<WindowId, RegistryError> {
        Ok(self.client(index)?.window())
    }

    /// Client name, or the default label when it has none.
    pub fn name(&self, index: usize) -> Result<&str, RegistryError> {
        Ok(self.client(index)?.display_name())
    }

    pub fn command(&self, index: usize) -> Result<Option<&str>, RegistryError> {
        Ok(self.client(index)?.command())
    }

    pub fn set_name(&mut self, index: usize, name: Option<String>) -> Result<(), RegistryError> {
        self.client_mut(index)?.set_name(name);
        Ok(())
    }

    pub fn set_command(
        &mut self,
        index: usize,
        command: Option<String>,
    ) -> Result<(), RegistryError> {
        self.client_mut(index)?.set_command(command);
        Ok(())
    }

    /// Append a client for `window` and focus it.
    pub fn add<D>(&mut self, window: WindowId, display: &mut D) -> Result<usize, RegistryError>
    where
        D: DisplayGateway + ?Sized,
    {
        if self.index_of(window).is_some() {
            return Err(RegistryError::DuplicateWindow { window });
        }

        self.clients.push(Client::new(window));
        let index = self.clients.len() - 1;

        info!(
            event = "core.registry.client_added",
            window,
            index,
            size = self.clients.len()
        );

        self.focus_set(index, display)?;
        Ok(index)
    }

    /// Remove the client for `window`, shifting later clients one slot left.
    ///
    /// When the focused client is removed, focus moves to the previous slot
    /// (staying at 0 for the first). Removing any other client keeps the
    /// numeric focus unless it now points past the end, in which case it is
    /// clamped to the last client. The focused client is raised again either way.
    pub fn remove<D>(&mut self, window: WindowId, display: &mut D) -> Result<Client, RegistryError>
    where
        D: DisplayGateway + ?Sized,
    {
        let index = self
            .index_of(window)
            .ok_or(RegistryError::ClientNotFound { window })?;

        let removed = self.clients.remove(index);
        let was_focused = index == self.focus;
        if was_focused && self.focus > 0 {
            self.focus -= 1;
        }

        info!(
            event = "core.registry.client_removed",
            window,
            index,
            was_focused,
            size = self.clients.len()
        );

        if self.clients.is_empty() {
            self.focus = 0;
            self.scroll_offset = 0;
            self.redraw = true;
            return Ok(removed);
        }

        if self.focus >= self.clients.len() {
            self.focus = self.clients.len() - 1;
        }
        self.focus_set(self.focus, display)?;

        Ok(removed)
    }

    /// Move focus `n` tabs to the right, wrapping around.
    pub fn focus_next<D>(&mut self, n: usize, display: &mut D) -> Result<usize, RegistryError>
    where
        D: DisplayGateway + ?Sized,
    {
        if self.clients.is_empty() {
            return Err(RegistryError::Empty);
        }
        let target = (self.focus + n % self.clients.len()) % self.clients.len();
        self.focus_set(target, display)?;
        Ok(target)
    }

    /// Move focus `n` tabs to the left, wrapping around.
    pub fn focus_prev<D>(&mut self, n: usize, display: &mut D) -> Result<usize, RegistryError>
    where
        D: DisplayGateway + ?Sized,
    {
        if self.clients.is_empty() {
            return Err(RegistryError::Empty);
        }
        let size = self.clients.len();
        let n = n % size;
        let target = if n <= self.focus {
            self.focus - n
        } else {
            size - n + self.focus
        };
        self.focus_set(target, display)?;
        Ok(target)
    }

    /// Focus the client at `index`: raise it, advertise its name on the
    /// container and scroll the bar so its tab is visible.
    pub fn focus_set<D>(&mut self, index: usize, display: &mut D) -> Result<(), RegistryError>
    where
        D: DisplayGateway + ?Sized,
    {
        let window = self.window(index)?;

        self.focus = index;
        self.fit_focus();
        self.redraw = true;

        debug!(
            event = "core.registry.focus_changed",
            index,
            window,
            scroll_offset = self.scroll_offset
        );

        display.raise_window(window)?;
        let name = self.name(index)?.to_string();
        display.set_container_name(&name)?;
        Ok(())
    }

    /// Give every embedded window the container's content area below the bar.
    pub fn resize_all<D>(&self, display: &mut D) -> Result<(), RegistryError>
    where
        D: DisplayGateway + ?Sized,
    {
        let (width, height) = display.size();
        let content_height = height.saturating_sub(display.metrics().bar_height).max(1);
        for client in &self.clients {
            display.resize_window(client.window(), width.max(1), content_height)?;
        }
        Ok(())
    }

    /// Resize a single client to the content area.
    pub fn resize<D>(&self, index: usize, display: &mut D) -> Result<(), RegistryError>
    where
        D: DisplayGateway + ?Sized,
    {
        let window = self.window(index)?;
        let (width, height) = display.size();
        let content_height = height.saturating_sub(display.metrics().bar_height).max(1);
        display.resize_window(window, width.max(1), content_height)?;
        Ok(())
    }

    /// Span of tab `index` in bar coordinates for the current scroll offset.
    pub fn bounds_of(&self, index: usize) -> Bounds {
        let tab_width = i64::from(self.tab_width);
        let start = (index as i64 - self.scroll_offset as i64) * tab_width;
        Bounds {
            start,
            end: start + tab_width,
        }
    }

    /// Find the visible tab whose span contains bar coordinate `x`.
    pub fn hit_test(&self, x: i64) -> Option<usize> {
        let width = i64::from(self.display_width);
        for index in self.scroll_offset..self.clients.len() {
            let bounds = self.bounds_of(index);
            if bounds.start > width {
                break;
            }
            if bounds.contains(x) {
                return Some(index);
            }
        }
        None
    }

    /// Track a new container width and keep the focused tab on screen.
    pub fn set_display_width(&mut self, width: u16) {
        self.display_width = width;
        self.fit_focus();
    }

    /// Re-run the offset search only when the focused tab is off screen.
    fn fit_focus(&mut self) {
        if self.clients.is_empty() {
            self.scroll_offset = 0;
            return;
        }
        if !self
            .bounds_of(self.focus)
            .fits_within(i64::from(self.display_width))
        {
            self.update_offset();
        }
    }

    /// Pick the smallest scroll offset that shows the whole focused tab.
    ///
    /// Falls back to starting the bar at the focused tab when no offset
    /// fits, i.e. when a single tab is wider than the display.
    pub fn update_offset(&mut self) {
        let width = i64::from(self.display_width);
        for offset in 0..self.clients.len() {
            self.scroll_offset = offset;
            if self.bounds_of(self.focus).fits_within(width) {
                return;
            }
        }
        self.scroll_offset = self.focus;
    }

    pub fn mark_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    /// Return and clear the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        mem::replace(&mut self.redraw, false)
    }
}
