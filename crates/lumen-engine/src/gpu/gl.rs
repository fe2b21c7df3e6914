//! OpenGL backend over `glow`.
//!
//! Every call assumes the context is current on the calling thread.

use glow::HasContext;

use super::{GraphicsBackend, StageKind, UniformValue};

impl GraphicsBackend for glow::Context {
    type Stage = <glow::Context as HasContext>::Shader;
    type Program = <glow::Context as HasContext>::Program;
    type UniformLocation = <glow::Context as HasContext>::UniformLocation;

    fn create_stage(&self, kind: StageKind) -> Result<Self::Stage, String> {
        let gl_kind = match kind {
            StageKind::Vertex => glow::VERTEX_SHADER,
            StageKind::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { self.create_shader(gl_kind) }
    }

    fn compile_stage(&self, stage: Self::Stage, source: &str) -> Result<(), String> {
        unsafe {
            self.shader_source(stage, source);
            self.compile_shader(stage);
            if self.get_shader_compile_status(stage) {
                Ok(())
            } else {
                Err(self.get_shader_info_log(stage))
            }
        }
    }

    fn delete_stage(&self, stage: Self::Stage) {
        unsafe { self.delete_shader(stage) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_stage(&self, program: Self::Program, stage: Self::Stage) {
        unsafe { self.attach_shader(program, stage) }
    }

    fn detach_stage(&self, program: Self::Program, stage: Self::Stage) {
        unsafe { self.detach_shader(program, stage) }
    }

    fn link_program(&self, program: Self::Program) -> Result<(), String> {
        unsafe {
            HasContext::link_program(self, program);
            if self.get_program_link_status(program) {
                Ok(())
            } else {
                Err(self.get_program_info_log(program))
            }
        }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn set_uniform(&self, location: Option<&Self::UniformLocation>, value: &UniformValue) {
        // GL ignores writes to location -1; skip the call entirely instead.
        let Some(loc) = location else {
            return;
        };
        let loc = Some(loc);

        unsafe {
            match *value {
                UniformValue::Int(v) => self.uniform_1_i32(loc, v),
                UniformValue::IVec2(v) => self.uniform_2_i32(loc, v.x, v.y),
                UniformValue::IVec3(v) => self.uniform_3_i32(loc, v.x, v.y, v.z),
                UniformValue::IVec4(v) => self.uniform_4_i32(loc, v.x, v.y, v.z, v.w),
                UniformValue::Float(v) => self.uniform_1_f32(loc, v),
                UniformValue::Vec2(v) => self.uniform_2_f32(loc, v.x, v.y),
                UniformValue::Vec3(v) => self.uniform_3_f32(loc, v.x, v.y, v.z),
                UniformValue::Vec4(v) => self.uniform_4_f32(loc, v.x, v.y, v.z, v.w),
                UniformValue::Mat4 { value, transpose } => {
                    self.uniform_matrix_4_f32_slice(loc, transpose, &value.to_cols_array())
                }
            }
        }
    }
}
