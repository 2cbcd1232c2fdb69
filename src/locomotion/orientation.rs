use glam::Vec3;

/// Pitch limit in degrees, short of straight up/down to avoid gimbal lock.
pub const PITCH_LIMIT: f32 = 89.0;

/// Yaw/pitch view direction with its derived orthonormal basis.
///
/// The basis is private and always rebuilt from the angles together, so
/// `front`, `right` and `up` can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Horizontal rotation (degrees)
    yaw: f32,
    /// Vertical rotation (degrees), clamped
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        let mut orientation = Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        orientation.update_basis();
        orientation
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Rotate by already-scaled angle deltas (degrees).
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    fn update_basis(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Orientation {
    /// Looking down -Z.
    fn default() -> Self {
        Self::new(-90.0, 0.0)
    }
}
