use glam::Vec3;

/// Camera orientation as three mutually orthogonal unit vectors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl CameraBasis {
    /// Classic look-at construction from an eye position and a target.
    ///
    /// `forward` here is `normalize(position - target)`: it points from the
    /// target back toward the eye (the camera's +Z axis in view space).
    ///
    /// Preconditions: `position != target`, and `world_up` is not parallel to
    /// `position - target`. No fallback up vector is substituted; violating
    /// this yields non-finite components (debug builds assert).
    pub fn look_at(position: Vec3, target: Vec3, world_up: Vec3) -> Self {
        let forward = (position - target).normalize();
        let side = world_up.cross(forward);
        debug_assert!(
            side.length_squared() > f32::EPSILON,
            "world_up is parallel to the view direction"
        );

        let right = side.normalize();
        let up = forward.cross(right);

        Self { forward, right, up }
    }

    /// Basis for a view direction, with `right = forward x world_up`.
    pub(crate) fn from_forward(forward: Vec3, world_up: Vec3) -> Self {
        let right = forward.cross(world_up).normalize();
        let up = right.cross(forward);
        Self { forward, right, up }
    }

    /// True when all vectors are unit length and pairwise orthogonal within `tolerance`.
    pub fn is_orthonormal(&self, tolerance: f32) -> bool {
        let unit = |v: Vec3| (v.length() - 1.0).abs() <= tolerance;
        unit(self.forward)
            && unit(self.right)
            && unit(self.up)
            && self.forward.dot(self.right).abs() <= tolerance
            && self.forward.dot(self.up).abs() <= tolerance
            && self.right.dot(self.up).abs() <= tolerance
    }
}
