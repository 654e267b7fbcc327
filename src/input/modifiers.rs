//! Keyboard modifier state tracking.

use super::events::Key;

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Shift, Ctrl, Alt) are currently pressed.
/// Used when matching keyboard shortcuts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the state for a modifier key. Returns false for other keys.
    pub fn update(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Shift => self.shift = pressed,
            Key::Ctrl => self.ctrl = pressed,
            Key::Alt => self.alt = pressed,
            _ => return false,
        }
        true
    }

    /// Whether a command modifier (Ctrl or Alt) is held.
    pub fn command_held(&self) -> bool {
        self.ctrl || self.alt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_tracks_only_modifier_keys() {
        let mut mods = Modifiers::new();
        assert!(mods.update(Key::Ctrl, true));
        assert!(!mods.update(Key::Char('z'), true));
        assert!(mods.ctrl && mods.command_held());

        mods.update(Key::Ctrl, false);
        assert_eq!(mods, Modifiers::default());
    }
}
