//! First-person walk-through over a heightmap terrain.
//!
//! - [`terrain`] - Height field, raster loading, mesh generation, height sampling
//! - [`locomotion`] - Gravity, jumping and terrain-following for the viewpoint
//! - [`input`] - Key/mouse events to per-tick movement
//! - [`camera`] - View and projection matrices
//! - [`session`] - Per-frame ownership of all of the above

pub mod camera;
pub mod input;
pub mod locomotion;
pub mod session;
pub mod terrain;
