//! Lumen engine crate.
//!
//! Shader program lifecycle and an orientation camera for OpenGL render
//! loops. `gpu` abstracts the graphics API (`glow` in production,
//! `gpu::mock::MockBackend` in tests); `shader` and `camera` are the
//! pieces a render loop holds on to.

pub mod camera;
pub mod config;
pub mod gpu;
pub mod input;
pub mod logging;
pub mod shader;
pub mod time;
