//! X11 display gateway built on `x11rb`.
//!
//! Owns the connection, the container window, the bar and tab pixmaps, the
//! label font and the five graphics contexts used by the bar renderer.

use std::os::fd::{AsFd, BorrowedFd};

use tracing::{debug, info, warn};
use x11rb::connection::Connection;
use x11rb::errors::{ReplyError, ReplyOrIdError};
use x11rb::protocol::Event;
use x11rb::protocol::xproto::{
    AtomEnum, ChangeWindowAttributesAux, Char2b, Colormap, ConfigureWindowAux,
    ConnectionExt as _, CoordMode, CreateGCAux, CreateWindowAux, EventMask, Font, Gcontext,
    Pixmap, Point, PropMode, Rectangle, StackMode, Window, WindowClass,
};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use crate::config::XtabsConfig;
use crate::display::errors::DisplayError;
use crate::display::traits::DisplayGateway;
use crate::display::types::{
    BarMetrics, DisplayEvent, Pen, Rect, Surface, WindowId, WindowProperty,
};

/// Property reads ask for the whole value; the server clamps to what exists.
const MAX_PROPERTY_LENGTH: u32 = u32::MAX;

/// `ImageText8` accepts at most 255 bytes per request.
const MAX_TEXT8_LENGTH: usize = 255;

struct Pens {
    normal_fg: Gcontext,
    normal_bg: Gcontext,
    focused_fg: Gcontext,
    focused_bg: Gcontext,
    border: Gcontext,
}

impl Pens {
    fn get(&self, pen: Pen) -> Gcontext {
        match pen {
            Pen::NormalFg => self.normal_fg,
            Pen::NormalBg => self.normal_bg,
            Pen::FocusedFg => self.focused_fg,
            Pen::FocusedBg => self.focused_bg,
            Pen::Border => self.border,
        }
    }

    fn all(&self) -> [Gcontext; 5] {
        [
            self.normal_fg,
            self.normal_bg,
            self.focused_fg,
            self.focused_bg,
            self.border,
        ]
    }
}

pub struct X11Display {
    conn: RustConnection,
    depth: u8,
    container: Window,
    bar: Pixmap,
    tab: Pixmap,
    font: Font,
    pens: Pens,
    metrics: BarMetrics,
    width: u16,
    height: u16,
}

fn reply_error(request: &'static str, err: ReplyError) -> DisplayError {
    match err {
        ReplyError::ConnectionError(e) => DisplayError::from(e),
        ReplyError::X11Error(e) => DisplayError::request(request, format!("{:?}", e.error_kind)),
    }
}

fn id_error(request: &'static str, err: ReplyOrIdError) -> DisplayError {
    match err {
        ReplyOrIdError::ConnectionError(e) => DisplayError::from(e),
        ReplyOrIdError::X11Error(e) => {
            DisplayError::request(request, format!("{:?}", e.error_kind))
        }
        ReplyOrIdError::IdsExhausted => DisplayError::request(request, "resource ids exhausted"),
    }
}

/// Encode `text` for the core font protocol, replacing characters outside Latin-1.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .take(MAX_TEXT8_LENGTH)
        .collect()
}

fn property_kind(atom: u32) -> WindowProperty {
    if atom == u32::from(AtomEnum::WM_NAME) {
        WindowProperty::Name
    } else if atom == u32::from(AtomEnum::WM_COMMAND) {
        WindowProperty::Command
    } else {
        WindowProperty::Other
    }
}

/// The property value, unless the server left bytes unread.
fn complete_value(value: &[u8], bytes_after: u32) -> Option<&[u8]> {
    (bytes_after == 0).then_some(value)
}

/// Split a `WM_COMMAND` value into its NUL-separated arguments.
fn split_command(value: &[u8]) -> Vec<String> {
    value
        .split(|b| *b == 0)
        .filter(|arg| !arg.is_empty())
        .map(|arg| String::from_utf8_lossy(arg).into_owned())
        .collect()
}

fn alloc_color(
    conn: &RustConnection,
    colormap: Colormap,
    name: &str,
) -> Result<u32, DisplayError> {
    let reply = conn
        .alloc_named_color(colormap, name.as_bytes())?
        .reply()
        .map_err(|_| DisplayError::ColorUnavailable {
            name: name.to_string(),
        })?;
    Ok(reply.pixel)
}

fn load_gc(
    conn: &RustConnection,
    drawable: Window,
    colormap: Colormap,
    font: Font,
    fg: &str,
    bg: &str,
) -> Result<Gcontext, DisplayError> {
    let fg_pixel = alloc_color(conn, colormap, fg)?;
    let bg_pixel = alloc_color(conn, colormap, bg)?;

    let gc = conn.generate_id().map_err(|e| id_error("create_gc", e))?;
    conn.create_gc(
        gc,
        drawable,
        &CreateGCAux::new()
            .foreground(fg_pixel)
            .background(bg_pixel)
            .font(font)
            .graphics_exposures(0),
    )?;
    Ok(gc)
}

impl X11Display {
    /// Connect to `$DISPLAY`, create and map the container window, and
    /// allocate the font, pens and pixmaps described by `config`.
    pub fn connect(config: &XtabsConfig) -> Result<Self, DisplayError> {
        let (conn, screen_num) = RustConnection::connect(None)?;

        let screen = &conn.setup().roots[screen_num];
        let root = screen.root;
        let depth = screen.root_depth;
        let visual = screen.root_visual;
        let colormap = screen.default_colormap;
        let white = screen.white_pixel;

        let width = config.window.width;
        let height = config.window.height;

        let container = conn
            .generate_id()
            .map_err(|e| id_error("create_window", e))?;
        conn.create_window(
            depth,
            container,
            root,
            0,
            0,
            width,
            height,
            1,
            WindowClass::INPUT_OUTPUT,
            visual,
            &CreateWindowAux::new().background_pixel(white).event_mask(
                EventMask::EXPOSURE
                    | EventMask::KEY_PRESS
                    | EventMask::BUTTON_PRESS
                    | EventMask::STRUCTURE_NOTIFY
                    | EventMask::SUBSTRUCTURE_NOTIFY
                    | EventMask::SUBSTRUCTURE_REDIRECT,
            ),
        )?;

        let font = conn.generate_id().map_err(|e| id_error("open_font", e))?;
        conn.open_font(font, config.bar.font.as_bytes())?;
        let font_info = conn
            .query_font(font)?
            .reply()
            .map_err(|_| DisplayError::FontUnavailable {
                name: config.bar.font.clone(),
            })?;

        let metrics = BarMetrics::from_font(
            font_info.font_ascent.max(0) as u16,
            font_info.font_descent.max(0) as u16,
            config.bar.font_padding,
            config.bar.tab_width,
        )
        .ok_or_else(|| DisplayError::BarTooTall {
            font: config.bar.font.clone(),
            padding: config.bar.font_padding,
        })?;

        let colors = &config.colors;
        let pens = Pens {
            normal_fg: load_gc(&conn, root, colormap, font, &colors.normal_fg, &colors.normal_bg)?,
            normal_bg: load_gc(&conn, root, colormap, font, &colors.normal_bg, &colors.normal_bg)?,
            focused_fg: load_gc(
                &conn,
                root,
                colormap,
                font,
                &colors.focused_fg,
                &colors.focused_bg,
            )?,
            focused_bg: load_gc(
                &conn,
                root,
                colormap,
                font,
                &colors.focused_bg,
                &colors.focused_bg,
            )?,
            border: load_gc(&conn, root, colormap, font, &colors.border, &colors.border)?,
        };

        let bar = conn.generate_id().map_err(|e| id_error("create_pixmap", e))?;
        let tab = conn.generate_id().map_err(|e| id_error("create_pixmap", e))?;
        conn.create_pixmap(depth, bar, container, width, metrics.bar_height)?;
        conn.create_pixmap(depth, tab, container, metrics.tab_width, metrics.bar_height)?;

        conn.map_window(container)?;
        conn.flush()?;

        info!(
            event = "core.display.connected",
            container,
            screen = screen_num,
            bar_height = metrics.bar_height,
            font = %config.bar.font
        );

        Ok(Self {
            conn,
            depth,
            container,
            bar,
            tab,
            font,
            pens,
            metrics,
            width,
            height,
        })
    }

    /// Free every server-side resource this gateway created and destroy the container.
    pub fn close(&mut self) -> Result<(), DisplayError> {
        self.conn.close_font(self.font)?;
        for gc in self.pens.all() {
            self.conn.free_gc(gc)?;
        }
        self.conn.free_pixmap(self.bar)?;
        self.conn.free_pixmap(self.tab)?;
        self.conn.destroy_window(self.container)?;
        self.conn.flush()?;

        info!(event = "core.display.closed", container = self.container);
        Ok(())
    }

    fn drawable(&self, surface: Surface) -> u32 {
        match surface {
            Surface::Bar => self.bar,
            Surface::Tab => self.tab,
            Surface::Container => self.container,
        }
    }

    fn translate(&self, event: Event) -> DisplayEvent {
        match event {
            Event::Expose(_) => DisplayEvent::Expose,
            Event::KeyPress(e) => DisplayEvent::KeyPress {
                keycode: e.detail,
                modifiers: u16::from(e.state),
            },
            Event::ButtonPress(e) => DisplayEvent::ButtonPress {
                x: e.event_x,
                y: e.event_y,
                button: e.detail,
            },
            Event::ConfigureNotify(e) => DisplayEvent::ConfigureNotify {
                window: e.window,
                width: e.width,
                height: e.height,
            },
            Event::CreateNotify(e) => DisplayEvent::CreateNotify { window: e.window },
            Event::DestroyNotify(e) => DisplayEvent::DestroyNotify { window: e.window },
            Event::PropertyNotify(e) => DisplayEvent::PropertyNotify {
                window: e.window,
                property: property_kind(e.atom),
            },
            Event::Error(e) => {
                // Asynchronous errors for requests on windows that vanished
                // between their creation and our reaction are routine.
                warn!(
                    event = "core.display.x11_error",
                    error_kind = ?e.error_kind,
                    bad_value = e.bad_value,
                    major_opcode = e.major_opcode
                );
                DisplayEvent::Unhandled
            }
            _ => DisplayEvent::Unhandled,
        }
    }
}

impl AsFd for X11Display {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.conn.stream().as_fd()
    }
}

impl DisplayGateway for X11Display {
    fn container(&self) -> WindowId {
        self.container
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

        self.conn.free_pixmap(self.bar)?;
        self.conn.create_pixmap(
            self.depth,
            self.bar,
            self.container,
            width.max(1),
            self.metrics.bar_height,
        )?;

        debug!(event = "core.display.bar_surface_recreated", width, height);
        Ok(())
    }

    fn embed_window(&mut self, window: WindowId) -> Result<(), DisplayError> {
        self.conn.unmap_window(window)?;
        self.conn.reparent_window(
            window,
            self.container,
            0,
            i16::try_from(self.metrics.bar_height).unwrap_or(i16::MAX),
        )?;
        self.conn.map_window(window)?;
        self.conn.change_window_attributes(
            window,
            &ChangeWindowAttributesAux::new().event_mask(EventMask::PROPERTY_CHANGE),
        )?;
        Ok(())
    }

    fn resize_window(
        &mut self,
        window: WindowId,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new()
                .width(u32::from(width))
                .height(u32::from(height)),
        )?;
        Ok(())
    }

    fn raise_window(&mut self, window: WindowId) -> Result<(), DisplayError> {
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
        )?;
        Ok(())
    }

    fn kill_window(&mut self, window: WindowId) -> Result<(), DisplayError> {
        self.conn.kill_client(window)?;
        Ok(())
    }

    fn set_container_name(&mut self, name: &str) -> Result<(), DisplayError> {
        self.conn.change_property8(
            PropMode::REPLACE,
            self.container,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            name.as_bytes(),
        )?;
        Ok(())
    }

    fn window_name(&mut self, window: WindowId) -> Result<Option<String>, DisplayError> {
        let reply = self
            .conn
            .get_property(
                false,
                window,
                AtomEnum::WM_NAME,
                AtomEnum::ANY,
                0,
                MAX_PROPERTY_LENGTH,
            )?
            .reply()
            .map_err(|e| DisplayError::PropertyUnreadable {
                window,
                property: "WM_NAME",
                message: e.to_string(),
            })?;

        let value = complete_value(&reply.value, reply.bytes_after).ok_or_else(|| {
            DisplayError::PropertyUnreadable {
                window,
                property: "WM_NAME",
                message: format!("{} bytes left unread", reply.bytes_after),
            }
        })?;
        let value = value.strip_suffix(&[0]).unwrap_or(value);
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(value).into_owned()))
    }

    fn window_command(&mut self, window: WindowId) -> Result<Option<Vec<String>>, DisplayError> {
        let reply = self
            .conn
            .get_property(
                false,
                window,
                AtomEnum::WM_COMMAND,
                AtomEnum::ANY,
                0,
                MAX_PROPERTY_LENGTH,
            )?
            .reply()
            .map_err(|e| DisplayError::PropertyUnreadable {
                window,
                property: "WM_COMMAND",
                message: e.to_string(),
            })?;

        let value = complete_value(&reply.value, reply.bytes_after).ok_or_else(|| {
            DisplayError::PropertyUnreadable {
                window,
                property: "WM_COMMAND",
                message: format!("{} bytes left unread", reply.bytes_after),
            }
        })?;
        let args = split_command(value);
        if args.is_empty() {
            return Ok(None);
        }
        Ok(Some(args))
    }

    fn text_width(&mut self, text: &str) -> Result<i32, DisplayError> {
        let chars: Vec<Char2b> = latin1(text)
            .into_iter()
            .map(|b| Char2b { byte1: 0, byte2: b })
            .collect();
        let reply = self
            .conn
            .query_text_extents(self.font, &chars)?
            .reply()
            .map_err(|e| reply_error("query_text_extents", e))?;
        Ok(reply.overall_width)
    }

    fn fill_rect(&mut self, surface: Surface, pen: Pen, rect: Rect) -> Result<(), DisplayError> {
        self.conn.poly_fill_rectangle(
            self.drawable(surface),
            self.pens.get(pen),
            &[Rectangle {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            }],
        )?;
        Ok(())
    }

    fn stroke_rect(&mut self, surface: Surface, pen: Pen, rect: Rect) -> Result<(), DisplayError> {
        self.conn.poly_rectangle(
            self.drawable(surface),
            self.pens.get(pen),
            &[Rectangle {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            }],
        )?;
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
        self.conn.image_text8(
            self.drawable(surface),
            self.pens.get(pen),
            x,
            y,
            &latin1(text),
        )?;
        Ok(())
    }

    fn draw_line(
        &mut self,
        surface: Surface,
        pen: Pen,
        from: (i16, i16),
        to: (i16, i16),
    ) -> Result<(), DisplayError> {
        self.conn.poly_line(
            CoordMode::ORIGIN,
            self.drawable(surface),
            self.pens.get(pen),
            &[Point { x: from.0, y: from.1 }, Point { x: to.0, y: to.1 }],
        )?;
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
        self.conn.copy_area(
            self.drawable(src),
            self.drawable(dst),
            self.pens.normal_bg,
            src_origin.0,
            src_origin.1,
            dst_origin.0,
            dst_origin.1,
            width,
            height,
        )?;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<DisplayEvent>, DisplayError> {
        match self.conn.poll_for_event()? {
            Some(event) => Ok(Some(self.translate(event))),
            None => Ok(None),
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.conn.flush()?;
        Ok(())
    }
}
