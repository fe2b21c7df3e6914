use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use crate::gpu::{GraphicsBackend, StageKind, UniformValue};

use super::ShaderError;

/// Exclusive owner of a backend program handle.
///
/// `release` is the only place a program is deleted. Both `dispose` and drop
/// go through it; `Option::take` makes the delete happen at most once.
struct ProgramHandle<B: GraphicsBackend> {
    backend: Rc<B>,
    program: Option<B::Program>,
}

impl<B: GraphicsBackend> ProgramHandle<B> {
    fn get(&self) -> Option<B::Program> {
        self.program
    }

    fn release(&mut self) {
        if let Some(program) = self.program.take() {
            self.backend.delete_program(program);
        }
    }
}

impl<B: GraphicsBackend> Drop for ProgramHandle<B> {
    // Fallback path: backend handle only. Must not reach into any other
    // state owned by the program.
    fn drop(&mut self) {
        self.release();
    }
}

/// A stage object that is deleted when the guard goes out of scope.
struct StageGuard<'a, B: GraphicsBackend> {
    backend: &'a B,
    stage: B::Stage,
}

impl<B: GraphicsBackend> Drop for StageGuard<'_, B> {
    fn drop(&mut self) {
        self.backend.delete_stage(self.stage);
    }
}

fn compile_stage<'a, B: GraphicsBackend>(
    backend: &'a B,
    kind: StageKind,
    source: &str,
) -> Result<StageGuard<'a, B>, ShaderError> {
    if source.trim().is_empty() {
        return Err(ShaderError::Compile {
            stage: kind,
            log: "error: shader source is empty".to_string(),
        });
    }

    let stage = backend.create_stage(kind).map_err(ShaderError::Backend)?;
    let guard = StageGuard { backend, stage };

    backend.compile_stage(stage, source).map_err(|log| {
        log::warn!("{kind} shader failed to compile: {log}");
        ShaderError::Compile { stage: kind, log }
    })?;

    Ok(guard)
}

/// A linked vertex + fragment program.
///
/// Single-threaded: holds an `Rc` to the backend, so it is neither `Send`
/// nor `Sync`.
///
/// Uniform writes go to whichever program is currently bound on the
/// context. Call [`use_program`](Self::use_program) before
/// [`set_uniform`](Self::set_uniform); this type does not track the bound
/// program and never rebinds on its own.
pub struct ShaderProgram<B: GraphicsBackend> {
    handle: ProgramHandle<B>,
    /// Resolved locations, including misses (`None`). Never invalidated:
    /// a linked program's uniform layout is immutable.
    uniform_locations: HashMap<String, Option<B::UniformLocation>>,
}

impl<B: GraphicsBackend> ShaderProgram<B> {
    /// Compiles both stages and links them into a program.
    ///
    /// Stage objects are released on every path. On link failure the
    /// program object is released before the error is returned.
    pub fn from_sources(
        backend: Rc<B>,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_stage(&*backend, StageKind::Vertex, vertex_src)?;
        let fragment = compile_stage(&*backend, StageKind::Fragment, fragment_src)?;

        let program = backend.create_program().map_err(ShaderError::Backend)?;
        let handle = ProgramHandle {
            backend: Rc::clone(&backend),
            program: Some(program),
        };

        backend.attach_stage(program, vertex.stage);
        backend.attach_stage(program, fragment.stage);

        if let Err(log) = backend.link_program(program) {
            log::warn!("shader program {program:?} failed to link: {log}");
            return Err(ShaderError::Link { log });
        }

        backend.detach_stage(program, vertex.stage);
        backend.detach_stage(program, fragment.stage);

        log::debug!("linked shader program {program:?}");

        Ok(Self {
            handle,
            uniform_locations: HashMap::new(),
        })
    }

    /// Reads both stage sources from disk, then behaves like [`from_sources`](Self::from_sources).
    pub fn from_files(
        backend: Rc<B>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_src = read_source(vertex_path.as_ref())?;
        let fragment_src = read_source(fragment_path.as_ref())?;
        Self::from_sources(backend, &vertex_src, &fragment_src)
    }

    /// Makes this the active program for subsequent draws and uniform writes.
    pub fn use_program(&self) -> Result<(), ShaderError> {
        let program = self.handle.get().ok_or(ShaderError::Disposed)?;
        self.handle.backend.use_program(Some(program));
        Ok(())
    }

    /// Writes `value` to the uniform `name` of the currently bound program.
    ///
    /// Precondition: this program is bound (see [`use_program`](Self::use_program)).
    ///
    /// The location is resolved once per name and cached, misses included.
    /// Unknown names are silently ignored, matching the graphics API's
    /// treatment of location -1.
    pub fn set_uniform(
        &mut self,
        name: &str,
        value: impl Into<UniformValue>,
    ) -> Result<(), ShaderError> {
        let program = self.handle.get().ok_or(ShaderError::Disposed)?;
        let value = value.into();
        let backend = &self.handle.backend;

        if !self.uniform_locations.contains_key(name) {
            let resolved = backend.uniform_location(program, name);
            if resolved.is_none() {
                log::debug!(
                    "uniform '{name}' ({}) not found in program {program:?}; writes will be ignored",
                    value.type_name()
                );
            }
            self.uniform_locations.insert(name.to_owned(), resolved);
        }

        let location = self.uniform_locations.get(name).and_then(Option::as_ref);
        backend.set_uniform(location, &value);
        Ok(())
    }

    /// Releases the program. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if let Some(program) = self.handle.get() {
            log::trace!("disposing shader program {program:?}");
        }
        self.handle.release();
        self.uniform_locations.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.get().is_none()
    }

    /// Backend program handle, `None` once disposed.
    pub fn handle(&self) -> Option<B::Program> {
        self.handle.get()
    }

    /// Number of names in the location cache (hits and misses).
    pub fn cached_uniform_count(&self) -> usize {
        self.uniform_locations.len()
    }
}

impl<B: GraphicsBackend> fmt::Debug for ShaderProgram<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("program", &self.handle.get())
            .field("cached_uniforms", &self.uniform_locations.len())
            .finish()
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
