use std::collections::HashSet;

use glam::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current input state for a single window.
///
/// Holds "is down" information and the last known cursor position.
/// Per-frame transitions and motion are written into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Cursor position in logical pixels, `None` while outside the window.
    pub pointer_pos: Option<Vec2>,

    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies one event to the current state and records deltas in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are not delivered while unfocused; forget held keys.
                    self.keys_down.clear();
                    self.pointer_pos = None;
                }
            }

            InputEvent::PointerMoved { x, y } => {
                let pos = Vec2::new(x, y);
                if let Some(last) = self.pointer_pos {
                    frame.cursor_delta += pos - last;
                }
                self.pointer_pos = Some(pos);
            }

            InputEvent::PointerDelta { dx, dy } => {
                frame.raw_pointer_delta += Vec2::new(dx, dy);
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Wheel(delta) => {
                let (x, y) = delta.lines();
                frame.wheel_lines += Vec2::new(x, y);
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(key) {
                        frame.keys_pressed.insert(key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(&key) {
                        frame.keys_released.insert(key);
                    }
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// True if any of `keys` is held.
    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.keys_down.contains(k))
    }
}
