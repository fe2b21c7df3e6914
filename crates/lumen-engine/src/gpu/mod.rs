//! Graphics backend seam.
//!
//! `ShaderProgram` never talks to OpenGL directly. It drives a
//! [`GraphicsBackend`], which is implemented for:
//! - `glow::Context` (real OpenGL 3.3 core)
//! - [`mock::MockBackend`] (recording backend for tests, no GPU required)
//!
//! All backend calls happen on the thread that owns the graphics context.

mod backend;
mod gl;
pub mod mock;

pub use backend::{GraphicsBackend, StageKind, UniformValue};
