use tracing::{debug, info, warn};

use crate::bar::draw_bar;
use crate::display::{DisplayError, DisplayEvent, DisplayGateway, WindowId, WindowProperty};
use crate::process::{Launcher, command_line};
use crate::registry::{Registry, RegistryError};
use crate::router::errors::RouterError;
use crate::router::keymap::{KeyCommand, Keymap, modifier_names};
use crate::session::{SessionError, SessionStore};

/// Single-threaded event dispatcher.
///
/// Owns the registry and everything a handler may touch. Once quit has been
/// requested every further event is ignored.
pub struct Router {
    registry: Registry,
    session: SessionStore,
    launcher: Launcher,
    keymap: Keymap,
    quit: bool,
}

impl Router {
    pub fn new(registry: Registry, session: SessionStore, launcher: Launcher, keymap: Keymap) -> Self {
        Self {
            registry,
            session,
            launcher,
            keymap,
            quit: false,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn request_quit(&mut self) {
        if !self.quit {
            info!(event = "core.router.quit_requested");
        }
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Dispatch one event to its handler.
    pub fn handle<D>(&mut self, event: DisplayEvent, display: &mut D) -> Result<(), RouterError>
    where
        D: DisplayGateway + ?Sized,
    {
        if self.quit {
            debug!(event = "core.router.event_ignored", kind = event.kind(), reason = "quit");
            return Ok(());
        }

        match event {
            DisplayEvent::CreateNotify { window } => self.on_create(window, display),
            DisplayEvent::DestroyNotify { window } => self.on_destroy(window, display),
            DisplayEvent::ConfigureNotify {
                window,
                width,
                height,
            } => self.on_configure(window, width, height, display),
            DisplayEvent::PropertyNotify { window, property } => {
                self.on_property(window, property, display)
            }
            DisplayEvent::ButtonPress { x, y, .. } => self.on_button(x, y, display),
            DisplayEvent::KeyPress { keycode, modifiers } => {
                self.on_key(keycode, modifiers, display)
            }
            DisplayEvent::Expose => {
                self.registry.mark_redraw();
                Ok(())
            }
            DisplayEvent::Unhandled => Ok(()),
        }
    }

    fn on_create<D>(&mut self, window: WindowId, display: &mut D) -> Result<(), RouterError>
    where
        D: DisplayGateway + ?Sized,
    {
        if window == display.container() {
            return Ok(());
        }
        if self.registry.index_of(window).is_some() {
            debug!(event = "core.router.create_ignored", window, reason = "already_tracked");
            return Ok(());
        }

        display.embed_window(window)?;
        let index = self.registry.add(window, display)?;
        self.registry.resize(index, display)?;

        // Properties set before embedding produce no notification.
        self.refresh_name(index, window, display)?;
        if self.refresh_command(index, window, display)? {
            self.persist_logged();
        }
        Ok(())
    }

    fn on_destroy<D>(&mut self, window: WindowId, display: &mut D) -> Result<(), RouterError>
    where
        D: DisplayGateway + ?Sized,
    {
        match self.registry.remove(window, display) {
            Ok(_) => {
                self.persist_logged();
                Ok(())
            }
            Err(RegistryError::ClientNotFound { window }) => {
                warn!(event = "core.router.destroy_untracked", window);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn on_configure<D>(
        &mut self,
        window: WindowId,
        width: u16,
        height: u16,
        display: &mut D,
    ) -> Result<(), RouterError>
    where
        D: DisplayGateway + ?Sized,
    {
        if window != display.container() {
            return Ok(());
        }
        if display.size() == (width, height) {
            return Ok(());
        }

        debug!(event = "core.router.container_resized", width, height);
        display.set_size(width, height)?;
        self.registry.set_display_width(width);
        self.registry.resize_all(display)?;
        self.registry.mark_redraw();
        Ok(())
    }

    fn on_property<D>(
        &mut self,
        window: WindowId,
        property: WindowProperty,
        display: &mut D,
    ) -> Result<(), RouterError>
    where
        D: DisplayGateway + ?Sized,
    {
        if window == display.container() || property == WindowProperty::Other {
            return Ok(());
        }
        let Some(index) = self.registry.index_of(window) else {
            debug!(event = "core.router.property_untracked", window, property = ?property);
            return Ok(());
        };

        match property {
            WindowProperty::Name => {
                self.refresh_name(index, window, display)?;
            }
            WindowProperty::Command => {
                self.refresh_command(index, window, display)?;
                self.persist_logged();
            }
            WindowProperty::Other => {}
        }
        Ok(())
    }

    fn on_button<D>(&mut self, x: i16, y: i16, display: &mut D) -> Result<(), RouterError>
    where
        D: DisplayGateway + ?Sized,
    {
        if i32::from(y) > i32::from(display.metrics().bar_height) {
            return Ok(());
        }
        match self.registry.hit_test(i64::from(x)) {
            Some(index) => {
                self.registry.focus_set(index, display)?;
            }
            None => {
                debug!(event = "core.router.click_missed", x);
            }
        }
        Ok(())
    }

    fn on_key<D>(&mut self, keycode: u8, modifiers: u16, display: &mut D) -> Result<(), RouterError>
    where
        D: DisplayGateway + ?Sized,
    {
        debug!(
            event = "core.router.key_pressed",
            keycode,
            modifiers = ?modifier_names(modifiers)
        );

        let Some(command) = self.keymap.lookup(keycode) else {
            debug!(event = "core.router.key_unmapped", keycode);
            return Ok(());
        };

        match command {
            KeyCommand::FocusPrev | KeyCommand::FocusNext if self.registry.is_empty() => {
                debug!(event = "core.router.navigation_skipped", reason = "empty");
            }
            KeyCommand::FocusPrev => {
                self.registry.focus_prev(1, display)?;
            }
            KeyCommand::FocusNext => {
                self.registry.focus_next(1, display)?;
            }
            KeyCommand::Quit => self.request_quit(),
            KeyCommand::Spawn => {
                self.launcher.spawn(None)?;
            }
            KeyCommand::SaveSession => {
                self.persist_session()?;
            }
        }
        Ok(())
    }

    fn refresh_name<D>(
        &mut self,
        index: usize,
        window: WindowId,
        display: &mut D,
    ) -> Result<(), RouterError>
    where
        D: DisplayGateway + ?Sized,
    {
        let name = readable(display.window_name(window))?;
        self.registry.set_name(index, name)?;
        if self.registry.is_focused(index) {
            let label = self.registry.name(index)?.to_string();
            display.set_container_name(&label)?;
        }
        self.registry.mark_redraw();
        Ok(())
    }

    /// Returns whether a command is now recorded for the client.
    fn refresh_command<D>(
        &mut self,
        index: usize,
        window: WindowId,
        display: &mut D,
    ) -> Result<bool, RouterError>
    where
        D: DisplayGateway + ?Sized,
    {
        let container = display.container();
        let command = readable(display.window_command(window))?
            .and_then(|argv| command_line(&argv, container));
        let recorded = command.is_some();
        self.registry.set_command(index, command)?;
        Ok(recorded)
    }

    /// Launch every command stored in the session. Returns how many started.
    pub fn restore_session(&mut self) -> Result<usize, SessionError> {
        let commands = self.session.load()?;
        let mut launched = 0;
        for command in &commands {
            match self.launcher.spawn(Some(command.as_str())) {
                Ok(_) => launched += 1,
                Err(e) => warn!(
                    event = "core.router.restore_spawn_failed",
                    command = %command,
                    error = %e
                ),
            }
        }
        info!(
            event = "core.router.restore_completed",
            session = self.session.name(),
            launched,
            total = commands.len()
        );
        Ok(launched)
    }

    /// Write the recorded command of every client to the session file.
    pub fn persist_session(&self) -> Result<usize, SessionError> {
        self.session
            .save(self.registry.clients().iter().filter_map(|c| c.command()))
    }

    fn persist_logged(&self) {
        if let Err(e) = self.persist_session() {
            warn!(event = "core.router.persist_failed", error = %e);
        }
    }

    /// Repaint the bar when a handler asked for it.
    pub fn redraw_if_needed<D>(&mut self, display: &mut D) -> Result<bool, DisplayError>
    where
        D: DisplayGateway + ?Sized,
    {
        if !self.registry.take_redraw() {
            return Ok(false);
        }
        draw_bar(&self.registry, display)?;
        Ok(true)
    }

    /// Save the session, then ask every embedded client to exit.
    pub fn teardown<D>(&mut self, display: &mut D)
    where
        D: DisplayGateway + ?Sized,
    {
        self.persist_logged();
        for client in self.registry.clients() {
            if let Err(e) = display.kill_window(client.window()) {
                warn!(event = "core.router.kill_failed", window = client.window(), error = %e);
            }
        }
        info!(
            event = "core.router.teardown_completed",
            clients = self.registry.len()
        );
    }
}

/// Property reads that fail for a live connection degrade to "no value".
fn readable<T>(result: Result<Option<T>, DisplayError>) -> Result<Option<T>, DisplayError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            warn!(event = "core.router.property_unreadable", error = %e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::testing::{CONTAINER, Call, RecordingDisplay};
    use std::fs;
    use std::thread;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    struct Fixture {
        router: Router,
        display: RecordingDisplay,
        _dir: TempDir,
    }

    fn fixture(width: u16) -> Fixture {
        let dir = TempDir::new().unwrap();
        let display = RecordingDisplay::new(width, 480, 100);
        let router = Router::new(
            Registry::new(100, width),
            SessionStore::new(dir.path(), "default"),
            Launcher::new(CONTAINER, "true %w"),
            Keymap::default(),
        );
        Fixture {
            router,
            display,
            _dir: dir,
        }
    }

    impl Fixture {
        fn send(&mut self, event: DisplayEvent) {
            self.router.handle(event, &mut self.display).unwrap();
        }

        fn create(&mut self, window: WindowId) {
            self.send(DisplayEvent::CreateNotify { window });
        }

        fn key(&mut self, keycode: u8) {
            self.send(DisplayEvent::KeyPress {
                keycode,
                modifiers: 0,
            });
        }

        fn windows(&self) -> Vec<WindowId> {
            self.router
                .registry()
                .clients()
                .iter()
                .map(|c| c.window())
                .collect()
        }

        fn session_contents(&self) -> String {
            fs::read_to_string(self.router.session().path()).unwrap_or_default()
        }
    }

    #[test]
    fn test_create_embeds_and_focuses() {
        let mut f = fixture(640);
        f.create(10);

        assert_eq!(f.windows(), vec![10]);
        assert_eq!(f.router.registry().focus(), Some(0));
        assert_eq!(f.display.calls[0], Call::Embed(10));
        assert!(f.display.calls.contains(&Call::Resize(10, 640, 480 - 17)));
        assert!(f.router.registry().redraw_pending());
    }

    #[test]
    fn test_create_for_container_is_ignored() {
        let mut f = fixture(640);
        f.create(CONTAINER);
        assert!(f.router.registry().is_empty());
        assert!(f.display.calls.is_empty());
    }

    #[test]
    fn test_create_twice_tracks_once() {
        let mut f = fixture(640);
        f.create(10);
        f.create(10);
        assert_eq!(f.windows(), vec![10]);
    }

    #[test]
    fn test_create_reads_existing_properties() {
        let mut f = fixture(640);
        f.display.names.insert(10, "vim".to_string());
        f.display.commands.insert(
            10,
            vec!["xterm".to_string(), "-into".to_string(), CONTAINER.to_string()],
        );

        f.create(10);

        assert_eq!(f.router.registry().name(0).unwrap(), "vim");
        assert_eq!(f.display.container_name(), Some("vim"));
        assert_eq!(f.session_contents(), "xterm -into %w\n");
    }

    #[test]
    fn test_command_with_line_break_is_not_saved() {
        let mut f = fixture(640);
        f.display.commands.insert(
            10,
            vec!["sh".to_string(), "-c".to_string(), "echo a\necho b".to_string()],
        );
        f.display.commands.insert(20, vec!["st".to_string()]);

        f.create(10);
        f.create(20);
        f.router.persist_session().unwrap();

        assert_eq!(f.router.registry().command(0).unwrap(), None);
        assert_eq!(f.router.session().load().unwrap(), vec!["st".to_string()]);
        assert_eq!(f.windows(), vec![10, 20]);
    }

    #[test]
    fn test_destroy_removes_and_persists() {
        let mut f = fixture(640);
        for w in [10, 20, 30] {
            f.display
                .commands
                .insert(w, vec![format!("app{}", w)]);
            f.create(w);
        }
        f.router.registry.focus_set(1, &mut f.display).unwrap();

        f.send(DisplayEvent::DestroyNotify { window: 20 });

        assert_eq!(f.windows(), vec![10, 30]);
        assert_eq!(f.router.registry().focus(), Some(0));
        assert_eq!(f.session_contents(), "app10\napp30\n");

        f.key(45);
        assert_eq!(f.router.registry().focus(), Some(1));
        f.key(45);
        assert_eq!(f.router.registry().focus(), Some(0));
    }

    #[test]
    fn test_destroy_untracked_is_noop() {
        let mut f = fixture(640);
        f.create(10);
        f.display.clear();

        f.send(DisplayEvent::DestroyNotify { window: 99 });

        assert_eq!(f.windows(), vec![10]);
        assert!(f.display.calls.is_empty());
    }

    #[test]
    fn test_configure_container_resizes_everything() {
        let mut f = fixture(640);
        for w in 1..=5 {
            f.create(w + 10);
        }
        f.display.clear();

        f.send(DisplayEvent::ConfigureNotify {
            window: CONTAINER,
            width: 250,
            height: 300,
        });

        assert_eq!(f.display.size(), (250, 300));
        assert_eq!(f.router.registry().display_width(), 250);
        assert_eq!(f.router.registry().scroll_offset(), 3);
        let resized = f
            .display
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Resize(_, 250, 283)))
            .count();
        assert_eq!(resized, 5);
    }

    #[test]
    fn test_configure_other_window_is_ignored() {
        let mut f = fixture(640);
        f.create(10);
        f.display.clear();

        f.send(DisplayEvent::ConfigureNotify {
            window: 10,
            width: 100,
            height: 100,
        });

        assert!(f.display.calls.is_empty());
    }

    #[test]
    fn test_name_change_updates_focused_title() {
        let mut f = fixture(640);
        f.create(10);
        f.create(20);
        f.router.registry.take_redraw();

        f.display.names.insert(10, "mutt".to_string());
        f.send(DisplayEvent::PropertyNotify {
            window: 10,
            property: WindowProperty::Name,
        });
        assert_eq!(f.router.registry().name(0).unwrap(), "mutt");
        assert_eq!(f.display.container_name(), Some("(no name)"));
        assert!(f.router.registry().redraw_pending());

        f.display.names.insert(20, "irssi".to_string());
        f.send(DisplayEvent::PropertyNotify {
            window: 20,
            property: WindowProperty::Name,
        });
        assert_eq!(f.display.container_name(), Some("irssi"));
    }

    #[test]
    fn test_unreadable_name_falls_back_to_default() {
        let mut f = fixture(640);
        f.display.names.insert(10, "vim".to_string());
        f.create(10);
        assert_eq!(f.router.registry().name(0).unwrap(), "vim");

        f.display.unreadable.push(10);
        f.send(DisplayEvent::PropertyNotify {
            window: 10,
            property: WindowProperty::Name,
        });

        assert_eq!(f.router.registry().name(0).unwrap(), "(no name)");
    }

    #[test]
    fn test_command_change_persists_session() {
        let mut f = fixture(640);
        f.create(10);
        f.create(20);

        f.display.commands.insert(
            20,
            vec![
                "urxvt".to_string(),
                "-embed".to_string(),
                CONTAINER.to_string(),
                "-e".to_string(),
                "mutt -y".to_string(),
            ],
        );
        f.send(DisplayEvent::PropertyNotify {
            window: 20,
            property: WindowProperty::Command,
        });

        assert_eq!(
            f.router.registry().command(1).unwrap(),
            Some("urxvt -embed %w -e 'mutt -y'")
        );
        assert_eq!(f.session_contents(), "urxvt -embed %w -e 'mutt -y'\n");
    }

    #[test]
    fn test_property_on_untracked_or_other_atom_is_ignored() {
        let mut f = fixture(640);
        f.create(10);
        f.display.clear();

        f.send(DisplayEvent::PropertyNotify {
            window: 99,
            property: WindowProperty::Name,
        });
        f.send(DisplayEvent::PropertyNotify {
            window: 10,
            property: WindowProperty::Other,
        });

        assert!(f.display.calls.is_empty());
    }

    #[test]
    fn test_click_in_bar_focuses_tab() {
        let mut f = fixture(640);
        for w in [10, 20, 30] {
            f.create(w);
        }

        f.send(DisplayEvent::ButtonPress {
            x: 150,
            y: 5,
            button: 1,
        });
        assert_eq!(f.router.registry().focus(), Some(1));

        f.send(DisplayEvent::ButtonPress {
            x: 0,
            y: 17,
            button: 1,
        });
        assert_eq!(f.router.registry().focus(), Some(0));
    }

    #[test]
    fn test_click_below_bar_or_past_tabs_is_ignored() {
        let mut f = fixture(640);
        for w in [10, 20, 30] {
            f.create(w);
        }

        f.send(DisplayEvent::ButtonPress {
            x: 50,
            y: 18,
            button: 1,
        });
        assert_eq!(f.router.registry().focus(), Some(2));

        f.send(DisplayEvent::ButtonPress {
            x: 500,
            y: 5,
            button: 1,
        });
        assert_eq!(f.router.registry().focus(), Some(2));
    }

    #[test]
    fn test_click_on_empty_bar_is_noop() {
        let mut f = fixture(640);
        f.send(DisplayEvent::ButtonPress {
            x: 10,
            y: 5,
            button: 1,
        });
        assert!(f.router.registry().is_empty());
    }

    #[test]
    fn test_navigation_keys() {
        let mut f = fixture(640);
        for w in [10, 20, 30] {
            f.create(w);
        }

        f.key(43);
        assert_eq!(f.router.registry().focus(), Some(1));
        f.key(44);
        assert_eq!(f.router.registry().focus(), Some(0));
        f.key(44);
        assert_eq!(f.router.registry().focus(), Some(2));
        f.key(46);
        assert_eq!(f.router.registry().focus(), Some(0));
    }

    #[test]
    fn test_navigation_on_empty_registry_is_noop() {
        let mut f = fixture(640);
        f.key(43);
        f.key(45);
        assert!(f.router.registry().is_empty());
    }

    #[test]
    fn test_unmapped_key_is_noop() {
        let mut f = fixture(640);
        f.create(10);
        f.display.clear();
        f.key(38);
        assert!(f.display.calls.is_empty());
        assert!(!f.router.quit_requested());
    }

    #[test]
    fn test_quit_key_stops_handling() {
        let mut f = fixture(640);
        f.key(53);
        assert!(f.router.quit_requested());

        f.create(10);
        f.send(DisplayEvent::Expose);
        assert!(f.router.registry().is_empty());
        assert!(f.display.calls.is_empty());
    }

    #[test]
    fn test_save_key_writes_session() {
        let mut f = fixture(640);
        f.display.commands.insert(10, vec!["st".to_string()]);
        f.create(10);
        f.create(20);
        fs::remove_file(f.router.session().path()).unwrap();

        f.key(25);

        assert_eq!(f.session_contents(), "st\n");
    }

    #[test]
    fn test_spawn_key_launches_default_command() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join(format!("spawned-{}", CONTAINER));
        let command = format!(
            "touch {}",
            shell_words::quote(&dir.path().join("spawned-%w").to_string_lossy())
        );
        let mut display = RecordingDisplay::new(640, 480, 100);
        let mut router = Router::new(
            Registry::new(100, 640),
            SessionStore::new(dir.path(), "default"),
            Launcher::new(CONTAINER, command),
            Keymap::default(),
        );

        router
            .handle(
                DisplayEvent::KeyPress {
                    keycode: 57,
                    modifiers: 0,
                },
                &mut display,
            )
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while !marker.exists() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(20));
        }
        assert!(marker.exists(), "default command did not run");
        assert!(router.registry().is_empty());
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut display = RecordingDisplay::new(640, 480, 100);
        let mut router = Router::new(
            Registry::new(100, 640),
            SessionStore::new(dir.path(), "default"),
            Launcher::new(CONTAINER, "xtabs-test-no-such-program"),
            Keymap::default(),
        );

        let err = router
            .handle(
                DisplayEvent::KeyPress {
                    keycode: 57,
                    modifiers: 0,
                },
                &mut display,
            )
            .unwrap_err();
        assert!(matches!(err, RouterError::Launch(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_expose_requests_redraw() {
        let mut f = fixture(640);
        f.router.registry.take_redraw();
        f.send(DisplayEvent::Expose);
        assert!(f.router.redraw_if_needed(&mut f.display).unwrap());
        assert!(!f.router.redraw_if_needed(&mut f.display).unwrap());
        assert!(f
            .display
            .calls
            .iter()
            .any(|c| matches!(c, Call::CopyArea(_, crate::display::Surface::Container, ..))));
    }

    #[test]
    fn test_restore_session_spawns_each_command() {
        let mut f = fixture(640);
        fs::write(
            f.router.session().path(),
            "true %w\nxtabs-test-no-such-program\ntrue\n",
        )
        .unwrap();

        assert_eq!(f.router.restore_session().unwrap(), 2);
    }

    #[test]
    fn test_save_then_restore_round_trip() {
        let mut f = fixture(640);
        for (w, argv) in [(10, vec!["true", "one"]), (20, vec!["true", "two words"])] {
            f.display
                .commands
                .insert(w, argv.into_iter().map(String::from).collect());
            f.create(w);
        }
        f.create(30);

        f.router.persist_session().unwrap();
        let saved = f.router.session().load().unwrap();
        assert_eq!(saved, vec!["true one".to_string(), "true 'two words'".to_string()]);

        let mut restored = fixture(640);
        fs::write(restored.router.session().path(), f.session_contents()).unwrap();
        assert_eq!(restored.router.restore_session().unwrap(), 2);
    }

    #[test]
    fn test_teardown_saves_and_kills_clients() {
        let mut f = fixture(640);
        f.display.commands.insert(20, vec!["st".to_string()]);
        for w in [10, 20] {
            f.create(w);
        }
        fs::remove_file(f.router.session().path()).unwrap();
        f.display.clear();

        f.router.teardown(&mut f.display);

        assert_eq!(f.display.calls, vec![Call::Kill(10), Call::Kill(20)]);
        assert_eq!(f.session_contents(), "st\n");
    }
}
