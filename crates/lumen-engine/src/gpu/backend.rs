use std::fmt;

use glam::{IVec2, IVec3, IVec4, Mat4, Vec2, Vec3, Vec4};

/// Pipeline role of a compiled stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Host-side value written to a uniform location.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    IVec2(IVec2),
    IVec3(IVec3),
    IVec4(IVec4),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    /// Column-major matrix. `transpose` asks the backend to transpose on upload.
    Mat4 { value: Mat4, transpose: bool },
}

impl UniformValue {
    /// A 4x4 matrix uploaded with the transpose flag set.
    pub fn mat4_transposed(value: Mat4) -> Self {
        UniformValue::Mat4 { value, transpose: true }
    }

    /// Short GLSL-style type name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            UniformValue::Int(_) => "int",
            UniformValue::IVec2(_) => "ivec2",
            UniformValue::IVec3(_) => "ivec3",
            UniformValue::IVec4(_) => "ivec4",
            UniformValue::Float(_) => "float",
            UniformValue::Vec2(_) => "vec2",
            UniformValue::Vec3(_) => "vec3",
            UniformValue::Vec4(_) => "vec4",
            UniformValue::Mat4 { .. } => "mat4",
        }
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        UniformValue::Int(v)
    }
}

impl From<IVec2> for UniformValue {
    fn from(v: IVec2) -> Self {
        UniformValue::IVec2(v)
    }
}

impl From<IVec3> for UniformValue {
    fn from(v: IVec3) -> Self {
        UniformValue::IVec3(v)
    }
}

impl From<IVec4> for UniformValue {
    fn from(v: IVec4) -> Self {
        UniformValue::IVec4(v)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4 { value, transpose: false }
    }
}

/// Primitives a shader program needs from the graphics API.
///
/// Handle types are opaque tokens owned by whoever created them. Program
/// binding is ambient context state: `set_uniform` writes to whichever
/// program was last passed to `use_program`.
///
/// Allocation primitives return the backend's message on failure.
/// `compile_stage` and `link_program` return the info log on failure.
pub trait GraphicsBackend {
    type Stage: Copy + fmt::Debug;
    type Program: Copy + PartialEq + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    fn create_stage(&self, kind: StageKind) -> Result<Self::Stage, String>;

    fn compile_stage(&self, stage: Self::Stage, source: &str) -> Result<(), String>;

    fn delete_stage(&self, stage: Self::Stage);

    fn create_program(&self) -> Result<Self::Program, String>;

    fn attach_stage(&self, program: Self::Program, stage: Self::Stage);

    fn detach_stage(&self, program: Self::Program, stage: Self::Stage);

    fn link_program(&self, program: Self::Program) -> Result<(), String>;

    fn delete_program(&self, program: Self::Program);

    /// Binds `program` as the current program, or unbinds with `None`.
    fn use_program(&self, program: Option<Self::Program>);

    /// Resolves a uniform name. `None` is the "not found" (-1) location.
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;

    /// Writes to the currently bound program. A `None` location is ignored.
    fn set_uniform(&self, location: Option<&Self::UniformLocation>, value: &UniformValue);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_kind_display() {
        assert_eq!(StageKind::Vertex.to_string(), "vertex");
        assert_eq!(StageKind::Fragment.to_string(), "fragment");
    }

    #[test]
    fn mat4_converts_without_transpose() {
        let v: UniformValue = Mat4::IDENTITY.into();
        assert_eq!(v, UniformValue::Mat4 { value: Mat4::IDENTITY, transpose: false });
        assert_eq!(
            UniformValue::mat4_transposed(Mat4::IDENTITY),
            UniformValue::Mat4 { value: Mat4::IDENTITY, transpose: true }
        );
    }

    #[test]
    fn scalar_and_vector_conversions() {
        assert_eq!(UniformValue::from(3), UniformValue::Int(3));
        assert_eq!(UniformValue::from(0.5f32), UniformValue::Float(0.5));
        assert_eq!(UniformValue::from(Vec3::X).type_name(), "vec3");
        assert_eq!(UniformValue::from(IVec4::ONE).type_name(), "ivec4");
    }
}
