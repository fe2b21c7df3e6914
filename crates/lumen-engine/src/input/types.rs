/// Keyboard key identifier.
///
/// The keys `FlyController` binds. Anything else arrives as `Key::Unknown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Shift,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    W,
    A,
    S,
    D,

    Unknown,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Scroll wheel delta.
///
/// `Line` is notched wheel input; `Pixel` comes from touchpads.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

/// Pixels of touchpad scroll treated as one wheel line.
pub const PIXELS_PER_LINE: f32 = 40.0;

impl WheelDelta {
    /// Delta expressed in wheel lines.
    pub fn lines(self) -> (f32, f32) {
        match self {
            WheelDelta::Line { x, y } => (x, y),
            WheelDelta::Pixel { x, y } => (x / PIXELS_PER_LINE, y / PIXELS_PER_LINE),
        }
    }
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when the platform reports a key-repeat.
        repeat: bool,
    },

    /// Cursor position in logical pixels.
    PointerMoved { x: f32, y: f32 },

    /// Raw device motion, unaffected by cursor clamping or acceleration.
    PointerDelta { dx: f32, dy: f32 },

    Wheel(WheelDelta),

    /// Cursor left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}
