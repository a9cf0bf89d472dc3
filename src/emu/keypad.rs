use crate::u4;

/// Pressed/released state of the 16 hex keys, written by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; 16],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: u4, pressed: bool) {
        self.keys[key] = pressed;
    }

    /// Key codes outside 0x0-0xF are never pressed.
    pub fn is_pressed(&self, code: u8) -> bool {
        u4::try_new(code).is_some_and(|key| self.keys[key])
    }

    /// Highest-numbered key currently held down.
    pub fn last_pressed(&self) -> Option<u4> {
        self.keys
            .iter()
            .rposition(|&pressed| pressed)
            .map(|key| u4::new(key as u8))
    }

    pub fn release_all(&mut self) {
        self.keys = [false; 16];
    }
}
