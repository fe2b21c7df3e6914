//! Frame timing.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame
//! and pass the resulting `FrameTime` to camera and controller updates.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
