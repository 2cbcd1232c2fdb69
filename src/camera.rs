use glam::Mat4;

use crate::locomotion::LocomotionState;

/// Field of view the camera starts with and resets to (degrees).
pub const DEFAULT_FOV: f32 = 60.0;
pub const MIN_FOV: f32 = 20.0;
pub const MAX_FOV: f32 = 170.0;

/// First-person lens: the eye follows a [`LocomotionState`].
pub struct Camera {
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Degrees of field of view per scroll line
    pub zoom_step: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            fov: DEFAULT_FOV,
            near: 0.1,
            far: 20000.0,
            zoom_step: 5.0,
        }
    }

    /// Scrolling up narrows the field of view.
    pub fn zoom(&mut self, scroll_lines: f32) {
        self.fov = (self.fov - self.zoom_step * scroll_lines).clamp(MIN_FOV, MAX_FOV);
    }

    pub fn reset_zoom(&mut self) {
        self.fov = DEFAULT_FOV;
    }

    /// Build view matrix (camera transform)
    pub fn build_view_matrix(&self, state: &LocomotionState) -> Mat4 {
        state.view_matrix()
    }

    /// Build perspective projection matrix
    pub fn build_projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn build_view_projection_matrix(&self, state: &LocomotionState, aspect: f32) -> Mat4 {
        self.build_projection_matrix(aspect) * self.build_view_matrix(state)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
