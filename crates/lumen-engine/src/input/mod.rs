//! Input subsystem.
//!
//! Public API is platform-agnostic. The render loop translates window-system
//! events into `InputEvent`s (see [`platform::winit`]), feeds them through
//! `InputState::apply_event`, and clears the `InputFrame` after each frame.

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, WheelDelta, PIXELS_PER_LINE};
