//! Shader program construction, disposal and failure paths against the
//! mock backend.

mod common;

use std::rc::Rc;

use glam::Mat4;
use lumen_engine::gpu::StageKind;
use lumen_engine::gpu::mock::MockBackend;
use lumen_engine::shader::{ShaderError, ShaderProgram};

use common::*;

#[test]
fn triangle_sources_build_a_usable_program() {
    let backend = backend();
    let program = ShaderProgram::from_sources(Rc::clone(&backend), TRIANGLE_VERTEX, TRIANGLE_FRAGMENT)
        .expect("triangle shaders should link");

    assert!(program.handle().is_some());
    program.use_program().unwrap();
    assert_eq!(backend.bound_program(), program.handle());

    // Stages are released once linked; only the program remains.
    assert_eq!(backend.live_stages(), 0);
    assert_eq!(backend.live_programs(), 1);
}

#[test]
fn missing_semicolon_reports_vertex_compile_error() {
    let backend = backend();
    let broken = TRIANGLE_VERTEX.replace("1.0);", "1.0)");

    let err = ShaderProgram::from_sources(Rc::clone(&backend), &broken, TRIANGLE_FRAGMENT)
        .unwrap_err();

    match &err {
        ShaderError::Compile { stage, log } => {
            assert_eq!(*stage, StageKind::Vertex);
            assert!(log.contains("error"), "{log}");
        }
        other => panic!("expected a compile error, got {other:?}"),
    }
    assert!(err.to_string().contains("vertex"));

    // The fragment stage is never created; nothing is left behind.
    assert_eq!(backend.stages_created(), 1);
    assert_eq!(backend.live_stages(), 0);
    assert_eq!(backend.programs_created(), 0);
}

#[test]
fn fragment_compile_error_releases_compiled_vertex_stage() {
    let backend = backend();
    let broken = TRIANGLE_FRAGMENT.replace("#version 330 core", "");

    let err = ShaderProgram::from_sources(Rc::clone(&backend), TRIANGLE_VERTEX, &broken)
        .unwrap_err();

    assert!(matches!(err, ShaderError::Compile { stage: StageKind::Fragment, .. }));
    assert_eq!(backend.stages_created(), 2);
    assert_eq!(backend.live_stages(), 0);
}

#[test]
fn link_failure_releases_program_and_stages() {
    let backend = backend();
    // Fragment reads `texCoord`, which the triangle vertex stage never writes.
    let err = ShaderProgram::from_sources(Rc::clone(&backend), TRIANGLE_VERTEX, CAMERA_FRAGMENT)
        .unwrap_err();

    let ShaderError::Link { log } = &err else {
        panic!("expected a link error, got {err:?}");
    };
    assert!(log.contains("texCoord"), "{log}");
    assert_eq!(err.log(), Some(log.as_str()));

    assert_eq!(backend.programs_created(), 1);
    assert_eq!(backend.live_programs(), 0);
    assert_eq!(backend.live_stages(), 0);
    assert_eq!(backend.invalid_deletes(), 0);
}

#[test]
fn allocation_failure_is_a_backend_error() {
    let backend = backend();
    backend.fail_next_program_allocation();

    let err = ShaderProgram::from_sources(Rc::clone(&backend), TRIANGLE_VERTEX, TRIANGLE_FRAGMENT)
        .unwrap_err();
    assert!(matches!(err, ShaderError::Backend(_)));
    assert_eq!(backend.live_stages(), 0);

    // The failure is one-shot.
    assert!(ShaderProgram::from_sources(Rc::clone(&backend), TRIANGLE_VERTEX, TRIANGLE_FRAGMENT).is_ok());
}

#[test]
fn repeated_construct_and_dispose_leaks_nothing() {
    let backend = backend();

    for i in 0..64 {
        let mut program =
            ShaderProgram::from_sources(Rc::clone(&backend), CAMERA_VERTEX, CAMERA_FRAGMENT).unwrap();
        program.use_program().unwrap();
        program.set_uniform("mixValue", 0.5f32).unwrap();

        // Half explicitly, half via drop.
        if i % 2 == 0 {
            program.dispose();
        }
    }

    assert_eq!(backend.programs_created(), 64);
    assert_eq!(backend.live_programs(), 0);
    assert_eq!(backend.live_stages(), 0);
    assert_eq!(backend.invalid_deletes(), 0);
}

#[test]
fn dispose_then_drop_releases_once() {
    let backend = backend();
    let mut program =
        ShaderProgram::from_sources(Rc::clone(&backend), TRIANGLE_VERTEX, TRIANGLE_FRAGMENT).unwrap();

    program.dispose();
    program.dispose();
    drop(program);

    assert_eq!(backend.programs_deleted(), 1);
    assert_eq!(backend.invalid_deletes(), 0);
}

#[test]
fn two_programs_keep_separate_uniform_state() {
    let backend = backend();
    let mut left =
        ShaderProgram::from_sources(Rc::clone(&backend), CAMERA_VERTEX, CAMERA_FRAGMENT).unwrap();
    let mut right =
        ShaderProgram::from_sources(Rc::clone(&backend), CAMERA_VERTEX, CAMERA_FRAGMENT).unwrap();

    left.use_program().unwrap();
    left.set_uniform("mixValue", 0.25f32).unwrap();
    right.use_program().unwrap();
    right.set_uniform("mixValue", 0.75f32).unwrap();

    let left_id = left.handle().unwrap();
    let right_id = right.handle().unwrap();
    assert_eq!(backend.uniform_value(left_id, "mixValue"), Some(0.25f32.into()));
    assert_eq!(backend.uniform_value(right_id, "mixValue"), Some(0.75f32.into()));

    // Disposing one leaves the other usable.
    left.dispose();
    right.set_uniform("model", Mat4::IDENTITY).unwrap();
    assert!(matches!(left.use_program(), Err(ShaderError::Disposed)));
}

#[test]
fn sources_load_from_files() {
    let dir = ShaderDir::new();
    let vert = dir.write("shader.vert", CAMERA_VERTEX);
    let frag = dir.write("shader.frag", CAMERA_FRAGMENT);

    let backend = backend();
    let program = ShaderProgram::from_files(Rc::clone(&backend), &vert, &frag).unwrap();
    assert!(!program.is_disposed());
}

#[test]
fn missing_file_is_an_io_error_before_any_backend_work() {
    let dir = ShaderDir::new();
    let vert = dir.write("shader.vert", CAMERA_VERTEX);
    let missing = dir.dir.path().join("missing.frag");

    let backend = Rc::new(MockBackend::new());
    let err = ShaderProgram::from_files(Rc::clone(&backend), &vert, &missing).unwrap_err();

    let ShaderError::Io { path, .. } = &err else {
        panic!("expected an io error, got {err:?}");
    };
    assert_eq!(path, &missing);
    assert!(std::error::Error::source(&err).is_some());
    assert!(backend.calls().is_empty());
}
