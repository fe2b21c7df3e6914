//! Shared shader sources and fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::rc::Rc;

use lumen_engine::gpu::mock::MockBackend;
use tempfile::TempDir;

/// The triangle demo's vertex stage.
pub const TRIANGLE_VERTEX: &str = "
    #version 330 core
    layout (location = 0) in vec3 aPos;

    void main()
    {
        gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
    }
";

/// The triangle demo's orange fragment stage.
pub const TRIANGLE_FRAGMENT: &str = "
    #version 330 core
    out vec4 FragColor;

    void main()
    {
        FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
    }
";

/// Vertex stage with the usual model/view/projection uniforms.
pub const CAMERA_VERTEX: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec2 aTexCoord;

out vec2 texCoord;

uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;

void main()
{
    texCoord = aTexCoord;
    gl_Position = projection * view * model * vec4(aPos, 1.0);
}
";

pub const CAMERA_FRAGMENT: &str = "#version 330 core
in vec2 texCoord;
out vec4 FragColor;

uniform sampler2D texture0;
uniform float mixValue;

void main()
{
    FragColor = texture(texture0, texCoord) * mixValue;
}
";

pub fn backend() -> Rc<MockBackend> {
    Rc::new(MockBackend::new())
}

/// Temporary directory holding shader files.
pub struct ShaderDir {
    pub dir: TempDir,
}

impl ShaderDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn write(&self, name: &str, source: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, source).expect("Failed to write shader file");
        path
    }
}
