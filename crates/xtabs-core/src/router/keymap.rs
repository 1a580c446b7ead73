use std::collections::HashMap;

/// Commands bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    FocusPrev,
    FocusNext,
    Quit,
    Spawn,
    SaveSession,
}

/// Hardware keycode bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<u8, KeyCommand>,
}

impl Default for Keymap {
    /// `h`/`j` previous, `k`/`l` next, `x` quit, `n` spawn, `w` save, as
    /// keycodes of a standard PC keyboard.
    fn default() -> Self {
        let bindings = [
            (43, KeyCommand::FocusPrev),
            (44, KeyCommand::FocusPrev),
            (45, KeyCommand::FocusNext),
            (46, KeyCommand::FocusNext),
            (53, KeyCommand::Quit),
            (57, KeyCommand::Spawn),
            (25, KeyCommand::SaveSession),
        ];
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl Keymap {
    pub fn lookup(&self, keycode: u8) -> Option<KeyCommand> {
        self.bindings.get(&keycode).copied()
    }
}

const MODIFIERS: [&str; 13] = [
    "Shift", "Lock", "Ctrl", "Alt", "Mod2", "Mod3", "Mod4", "Mod5", "Button1", "Button2",
    "Button3", "Button4", "Button5",
];

/// Names of the modifier and button bits set in a key event state mask.
pub fn modifier_names(mask: u16) -> Vec<&'static str> {
    MODIFIERS
        .iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, name)| *name)
        .collect()
}
