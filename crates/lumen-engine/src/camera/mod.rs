//! Orientation camera.
//!
//! `OrientationCamera` owns yaw, pitch and field of view and derives its
//! basis and matrices from them. `controller::FlyController` turns one frame
//! of input into camera motion.

mod basis;
pub mod controller;
mod orientation;

pub use basis::CameraBasis;
pub use controller::{ControllerConfig, FlyController, LoopControl, PointerSource};
pub use orientation::{CameraConfig, CameraConfigError, OrientationCamera, PITCH_LIMIT, WORLD_UP};
