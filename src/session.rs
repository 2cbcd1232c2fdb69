//! The per-frame simulation owner.
//!
//! A [`Session`] owns the terrain, walker, input and camera. Event handlers
//! get it passed in explicitly and the loop calls [`Session::tick`] once per
//! frame; nothing is reached through globals.

use glam::Mat4;

use crate::camera::Camera;
use crate::input::InputController;
use crate::locomotion::{GroundState, LocomotionController, LocomotionState};
use crate::terrain::{HeightField, TerrainError, TerrainMesh};

pub struct Session {
    pub field: HeightField,
    pub mesh: TerrainMesh,
    pub controller: LocomotionController,
    pub state: LocomotionState,
    pub input: InputController,
    pub camera: Camera,
}

impl Session {
    /// Build the mesh and spawn the walker over `field`.
    ///
    /// The mesh uses the controller mapping's tile size, so rendered and
    /// collision geometry share one grid spacing.
    pub fn new(field: HeightField, controller: LocomotionController) -> Result<Self, TerrainError> {
        let mesh = TerrainMesh::build(&field, controller.mapping.tile_size())?;
        let state = controller.spawn(&field);

        Ok(Self {
            field,
            mesh,
            controller,
            state,
            input: InputController::new(),
            camera: Camera::new(),
        })
    }

    /// Run one simulation step with everything collected since the last one.
    pub fn tick(&mut self, dt: f32) -> GroundState {
        let (yaw_delta, pitch_delta) = self.input.take_look_delta();
        if yaw_delta != 0.0 || pitch_delta != 0.0 {
            self.controller.look(&mut self.state, yaw_delta, pitch_delta);
        }

        let tick = self.input.tick_input(&self.state.orientation, dt);
        self.controller.step(&mut self.state, &self.field, &tick)
    }

    /// Height of the walker's viewpoint above the terrain directly below it.
    pub fn clearance(&self) -> f32 {
        let p = self.state.position;
        p.y - self.controller.terrain_height(&self.field, p.x, p.z)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.camera.build_view_projection_matrix(&self.state, aspect)
    }
}
