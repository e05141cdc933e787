//! Raw keyboard state, sampled once per frame
//!
//! The platform layer translates window events into `Key` presses/releases;
//! the games turn a `KeyState` snapshot into their own tick input.

use std::collections::HashSet;

/// Keys the games care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
    /// Pause toggle
    P,
    /// Music toggle
    M,
    /// Sound effects toggle
    S,
    /// Anything else (still counts for "press any key")
    Other,
}

/// Keyboard state for the current frame
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
    /// Keys that went down since the last `end_frame`, in press order
    pressed: Vec<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat presses only refresh the held state.
    pub fn key_down(&mut self, key: Key, repeat: bool) {
        self.held.insert(key);
        if !repeat {
            self.pressed.push(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Is the key currently held down
    pub fn held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Did the key go down this frame
    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Keys pressed this frame, oldest first
    pub fn presses(&self) -> &[Key] {
        &self.pressed
    }

    /// Release everything (window lost focus)
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }

    /// Forget this frame's presses; held keys carry over
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_hold() {
        let mut keys = KeyState::new();
        keys.key_down(Key::Up, false);
        assert!(keys.held(Key::Up));
        assert!(keys.just_pressed(Key::Up));

        keys.end_frame();
        assert!(keys.held(Key::Up));
        assert!(!keys.just_pressed(Key::Up));

        keys.key_up(Key::Up);
        assert!(!keys.held(Key::Up));
    }

    #[test]
    fn test_repeat_is_not_a_press() {
        let mut keys = KeyState::new();
        keys.key_down(Key::Space, false);
        keys.end_frame();
        keys.key_down(Key::Space, true);
        assert!(keys.held(Key::Space));
        assert!(!keys.just_pressed(Key::Space));
    }

    #[test]
    fn test_presses_keep_order() {
        let mut keys = KeyState::new();
        keys.key_down(Key::M, false);
        keys.key_down(Key::Other, false);
        assert_eq!(keys.presses(), &[Key::M, Key::Other]);
    }
}
