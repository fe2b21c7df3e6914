use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::{InputFrame, InputState, Key};
use crate::time::FrameTime;

use super::{OrientationCamera, WORLD_UP};

/// Returned from per-frame updates.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Which pointer motion drives look.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    /// Raw device motion. Keeps working with a grabbed cursor.
    #[default]
    Raw,
    /// Cursor position deltas in logical pixels.
    Cursor,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// World units per second.
    pub move_speed: f32,
    /// Field-of-view degrees per second per wheel line. Scrolling up zooms in.
    pub zoom_speed: f32,
    pub pointer_source: PointerSource,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.5,
            zoom_speed: 120.0,
            pointer_source: PointerSource::Raw,
        }
    }
}

/// First-person fly controls for an `OrientationCamera`.
///
/// W/S and Up/Down move along the view direction, A/D and Left/Right strafe,
/// Space/Shift move along the world up axis. Pointer look applies only while
/// `look_enabled` is set. Escape asks the loop to exit.
#[derive(Debug, Clone)]
pub struct FlyController {
    pub config: ControllerConfig,
    pub look_enabled: bool,
}

impl FlyController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config, look_enabled: true }
    }

    /// Applies one frame of input to `camera`.
    pub fn update(
        &self,
        camera: &mut OrientationCamera,
        state: &InputState,
        frame: &InputFrame,
        time: FrameTime,
    ) -> LoopControl {
        if frame.key_pressed(Key::Escape) {
            log::debug!("escape pressed; requesting exit");
            return LoopControl::Exit;
        }

        let dt = time.dt;

        let direction = self.movement(camera, state);
        if direction != Vec3::ZERO {
            camera.translate(direction.normalize() * self.config.move_speed * dt);
        }

        if self.look_enabled {
            let delta = self.pointer_delta(frame);
            if delta != Vec2::ZERO {
                let sensitivity = camera.config().sensitivity;
                camera.update_pointer_look(delta.x, delta.y, dt, sensitivity);
            }
        }

        if frame.wheel_lines.y != 0.0 {
            camera.adjust_field_of_view(-frame.wheel_lines.y * self.config.zoom_speed, dt);
        }

        LoopControl::Continue
    }

    fn movement(&self, camera: &OrientationCamera, state: &InputState) -> Vec3 {
        let basis = camera.basis();
        let mut dir = Vec3::ZERO;

        if state.any_down(&[Key::W, Key::ArrowUp]) {
            dir += basis.forward;
        }
        if state.any_down(&[Key::S, Key::ArrowDown]) {
            dir -= basis.forward;
        }
        if state.any_down(&[Key::D, Key::ArrowRight]) {
            dir += basis.right;
        }
        if state.any_down(&[Key::A, Key::ArrowLeft]) {
            dir -= basis.right;
        }
        if state.key_down(Key::Space) {
            dir += WORLD_UP;
        }
        if state.key_down(Key::Shift) {
            dir -= WORLD_UP;
        }

        dir
    }

    fn pointer_delta(&self, frame: &InputFrame) -> Vec2 {
        match self.config.pointer_source {
            PointerSource::Raw => frame.raw_pointer_delta,
            PointerSource::Cursor => frame.cursor_delta,
        }
    }
}

impl Default for FlyController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
