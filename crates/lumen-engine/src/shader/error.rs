use std::path::PathBuf;

use thiserror::Error;

use crate::gpu::StageKind;

/// Shader program errors.
///
/// `Compile` and `Link` are fatal to construction. `Disposed` is a
/// programmer error: the program was used after `dispose`.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: StageKind, log: String },

    #[error("failed to link shader program:\n{log}")]
    Link { log: String },

    #[error("shader program used after dispose")]
    Disposed,

    /// The backend could not allocate a stage or program object.
    #[error("graphics backend allocation failed: {0}")]
    Backend(String),

    #[error("failed to read shader source {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ShaderError {
    /// Backend diagnostic log for compile/link failures.
    pub fn log(&self) -> Option<&str> {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log } => Some(log.as_str()),
            _ => None,
        }
    }
}
