use std::collections::HashSet;

use glam::Vec2;

use super::types::Key;

/// Per-frame input deltas.
///
/// `InputState` holds what is currently down. `InputFrame` holds what
/// happened since the last `clear`: key transitions, accumulated motion and
/// scroll.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,

    /// Sum of raw device motion this frame.
    pub raw_pointer_delta: Vec2,

    /// Sum of cursor movement this frame, in logical pixels.
    ///
    /// The first move after the cursor enters (or after focus returns)
    /// only establishes a reference position and contributes nothing.
    pub cursor_delta: Vec2,

    /// Sum of wheel motion this frame, in lines. Positive `y` scrolls up.
    pub wheel_lines: Vec2,
}

impl InputFrame {
    /// Resets the frame; call once per frame after consumers have run.
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.raw_pointer_delta = Vec2::ZERO;
        self.cursor_delta = Vec2::ZERO;
        self.wheel_lines = Vec2::ZERO;
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
