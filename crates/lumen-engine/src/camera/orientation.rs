use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CameraBasis;

/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]` degrees so the view
/// direction never becomes parallel to the world up axis.
pub const PITCH_LIMIT: f32 = 89.0;

/// Vertical axis that yaw rotates around.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Camera tuning. Angles are in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Degrees per pointer unit per second.
    pub sensitivity: f32,
    pub min_fov: f32,
    pub max_fov: f32,
    pub initial_fov: f32,
    /// -90 looks down -Z.
    pub initial_yaw: f32,
    pub initial_pitch: f32,
}

/// A `CameraConfig` the camera cannot honor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraConfigError {
    #[error("camera.{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("field of view range must lie inside (0, 180) with min <= max, got [{min}, {max}]")]
    FovRange { min: f32, max: f32 },

    #[error("camera.sensitivity must be non-negative, got {0}")]
    NegativeSensitivity(f32),
}

impl CameraConfig {
    /// Every angle finite, `0 < min_fov <= max_fov < 180`, sensitivity >= 0.
    pub fn validate(&self) -> Result<(), CameraConfigError> {
        let fields = [
            ("sensitivity", self.sensitivity),
            ("min_fov", self.min_fov),
            ("max_fov", self.max_fov),
            ("initial_fov", self.initial_fov),
            ("initial_yaw", self.initial_yaw),
            ("initial_pitch", self.initial_pitch),
        ];
        if let Some(&(field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CameraConfigError::NonFinite { field, value });
        }

        if self.min_fov <= 0.0 || self.max_fov >= 180.0 || self.min_fov > self.max_fov {
            return Err(CameraConfigError::FovRange {
                min: self.min_fov,
                max: self.max_fov,
            });
        }
        if self.sensitivity < 0.0 {
            return Err(CameraConfigError::NegativeSensitivity(self.sensitivity));
        }

        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 5.0,
            min_fov: 10.0,
            max_fov: 85.0,
            initial_fov: 45.0,
            initial_yaw: -90.0,
            initial_pitch: 0.0,
        }
    }
}

/// Yaw/pitch driven camera.
///
/// The camera never moves itself: `position` belongs to the render loop.
/// The basis is derived from the angles on every query, so it cannot drift
/// out of sync with them.
#[derive(Debug, Clone)]
pub struct OrientationCamera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    field_of_view: f32,
    config: CameraConfig,
}

impl OrientationCamera {
    /// Rejects configs that fail [`CameraConfig::validate`]; initial pitch
    /// and field of view are clamped into range.
    pub fn new(position: Vec3, config: CameraConfig) -> Result<Self, CameraConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(position, config))
    }

    // `clamp` panics on an inverted or NaN range; `config` is validated.
    fn from_valid_config(position: Vec3, config: CameraConfig) -> Self {
        Self {
            position,
            yaw: config.initial_yaw,
            pitch: config.initial_pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            field_of_view: config.initial_fov.clamp(config.min_fov, config.max_fov),
            config,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// Sets both angles directly; pitch is clamped. Non-finite angles are ignored.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        if !(yaw.is_finite() && pitch.is_finite()) {
            log::debug!("ignoring non-finite orientation ({yaw}, {pitch})");
            return;
        }
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Sets the field of view, clamped to the configured range. Non-finite
    /// values are ignored.
    pub fn set_field_of_view(&mut self, fov: f32) {
        if !fov.is_finite() {
            log::debug!("ignoring non-finite field of view {fov}");
            return;
        }
        self.field_of_view = fov.clamp(self.config.min_fov, self.config.max_fov);
    }

    /// Applies one frame of pointer motion.
    ///
    /// Yaw accumulates without wrapping; the trigonometry is periodic.
    /// Pitch is inverted (pointer down looks down) and clamped.
    pub fn update_pointer_look(
        &mut self,
        pointer_dx: f32,
        pointer_dy: f32,
        elapsed_seconds: f32,
        sensitivity: f32,
    ) {
        let scale = elapsed_seconds * sensitivity;
        let (yaw, pitch) = (self.yaw + pointer_dx * scale, self.pitch - pointer_dy * scale);
        self.set_orientation(yaw, pitch);
    }

    /// Changes the field of view at `delta_degrees_per_second`, clamped to
    /// `[min_fov, max_fov]`.
    pub fn adjust_field_of_view(&mut self, delta_degrees_per_second: f32, elapsed_seconds: f32) {
        self.set_field_of_view(self.field_of_view + delta_degrees_per_second * elapsed_seconds);
    }

    /// Unit view direction from yaw/pitch.
    pub fn forward(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.basis().right
    }

    pub fn up(&self) -> Vec3 {
        self.basis().up
    }

    /// Forward/right/up. Never degenerate: pitch stays below 90 degrees.
    pub fn basis(&self) -> CameraBasis {
        CameraBasis::from_forward(self.forward(), WORLD_UP)
    }

    pub fn view_matrix(&self) -> Mat4 {
        let basis = self.basis();
        Mat4::look_at_rh(self.position, self.position + basis.forward, basis.up)
    }

    /// OpenGL-convention perspective projection from the current field of view.
    pub fn projection_matrix(&self, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.field_of_view.to_radians(), aspect_ratio, near, far)
    }
}

impl Default for OrientationCamera {
    fn default() -> Self {
        Self::from_valid_config(Vec3::new(0.0, 0.0, 3.0), CameraConfig::default())
    }
}
