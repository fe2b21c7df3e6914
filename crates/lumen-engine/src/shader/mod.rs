//! Shader programs.
//!
//! A [`ShaderProgram`] owns one linked GPU program built from a vertex and a
//! fragment stage, caches uniform locations by name, and releases its backend
//! handle exactly once (explicit `dispose` or drop, whichever comes first).

mod error;
mod program;

pub use error::ShaderError;
pub use program::ShaderProgram;
