//! Terrain-following first-person locomotion.
//!
//! A walker is either [`GroundState::Grounded`] or [`GroundState::Airborne`].
//! Each tick applies gravity (or a jump), integrates the position, and
//! resolves contact against the bilinear terrain height. Out-of-range
//! positions are never rejected; the height query clamps at the border.

pub mod orientation;

pub use orientation::Orientation;

use glam::{Mat4, Vec3};

use crate::terrain::{bilinear_height, GridMapping, HeightField};

/// Physics and look tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionConfig {
    /// Vertical acceleration (units/s², negative is down)
    pub gravity: f32,
    /// Vertical velocity set by a jump (units/s)
    pub jump_speed: f32,
    /// Clearance kept between the viewpoint and the terrain surface
    pub ground_offset: f32,
    /// Height above the highest sample at which the walker spawns
    pub spawn_offset: f32,
    /// Degrees of rotation per unit of look delta
    pub mouse_sensitivity: f32,
    /// Initial yaw (degrees)
    pub initial_yaw: f32,
    /// Initial pitch (degrees)
    pub initial_pitch: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            gravity: -30.81,
            jump_speed: 25.0,
            ground_offset: 0.5,
            spawn_offset: 5.0,
            mouse_sensitivity: 0.1,
            initial_yaw: -90.0,
            initial_pitch: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundState {
    #[default]
    Grounded,
    Airborne,
}

/// Everything the controller needs for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    /// Horizontal displacement for this tick, already speed- and dt-scaled.
    /// The y component is ignored.
    pub displacement: Vec3,
    /// Jump requested this tick
    pub jump: bool,
    /// Elapsed time (seconds)
    pub dt: f32,
}

/// Position, vertical motion and view direction of the walker.
///
/// Vertical velocity and ground state only change through
/// [`LocomotionController::step`], so a grounded walker always has zero
/// vertical velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionState {
    pub position: Vec3,
    pub orientation: Orientation,
    vertical_velocity: f32,
    ground: GroundState,
}

impl LocomotionState {
    /// A grounded, motionless walker.
    pub fn new(position: Vec3, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
            vertical_velocity: 0.0,
            ground: GroundState::Grounded,
        }
    }

    /// A walker in free flight with the given vertical velocity.
    pub fn airborne(position: Vec3, orientation: Orientation, vertical_velocity: f32) -> Self {
        Self {
            position,
            orientation,
            vertical_velocity,
            ground: GroundState::Airborne,
        }
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn ground(&self) -> GroundState {
        self.ground
    }

    pub fn is_grounded(&self) -> bool {
        self.ground == GroundState::Grounded
    }

    pub fn front(&self) -> Vec3 {
        self.orientation.front()
    }

    pub fn right(&self) -> Vec3 {
        self.orientation.right()
    }

    pub fn up(&self) -> Vec3 {
        self.orientation.up()
    }

    /// Right-handed look-at transform from the current viewpoint.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up())
    }
}

/// Advances a [`LocomotionState`] over a [`HeightField`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionController {
    pub config: LocomotionConfig,
    pub mapping: GridMapping,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig, mapping: GridMapping) -> Self {
        Self { config, mapping }
    }

    /// Terrain height under a world position.
    pub fn terrain_height(&self, field: &HeightField, x: f32, z: f32) -> f32 {
        bilinear_height(field, &self.mapping, x, z)
    }

    /// Initial state above the field's highest sample.
    pub fn spawn(&self, field: &HeightField) -> LocomotionState {
        let (gx, gz, _) = field.highest_sample();
        let (x, z) = self.mapping.to_world(field, gx as f32, gz as f32);
        let y = field.world_height(gx as isize, gz as isize) + self.config.spawn_offset;

        log::info!("Spawning at ({x:.2}, {y:.2}, {z:.2}), grid cell ({gx}, {gz})");
        LocomotionState::new(
            Vec3::new(x, y, z),
            Orientation::new(self.config.initial_yaw, self.config.initial_pitch),
        )
    }

    /// Apply a look delta scaled by the mouse sensitivity.
    pub fn look(&self, state: &mut LocomotionState, yaw_delta: f32, pitch_delta: f32) {
        let s = self.config.mouse_sensitivity;
        state.orientation.rotate(yaw_delta * s, pitch_delta * s);
    }

    /// Advance one simulation tick and return the resulting ground state.
    pub fn step(
        &self,
        state: &mut LocomotionState,
        field: &HeightField,
        input: &TickInput,
    ) -> GroundState {
        let previous = state.ground;

        if input.jump && state.is_grounded() {
            state.vertical_velocity = self.config.jump_speed;
            state.ground = GroundState::Airborne;
        } else {
            state.vertical_velocity += self.config.gravity * input.dt;
        }

        let mut candidate =
            state.position + Vec3::new(input.displacement.x, 0.0, input.displacement.z);
        candidate.y += state.vertical_velocity * input.dt;

        let floor =
            self.terrain_height(field, candidate.x, candidate.z) + self.config.ground_offset;
        if candidate.y <= floor {
            candidate.y = floor;
            if state.vertical_velocity <= 0.0 {
                state.vertical_velocity = 0.0;
                state.ground = GroundState::Grounded;
            } else {
                state.ground = GroundState::Airborne;
            }
        } else {
            state.ground = GroundState::Airborne;
        }

        state.position = candidate;

        if state.ground != previous {
            log::debug!(
                "{:?} -> {:?} at ({:.2}, {:.2}, {:.2})",
                previous,
                state.ground,
                candidate.x,
                candidate.y,
                candidate.z
            );
        }
        state.ground
    }
}
