//! Continuous height queries over a [`HeightField`].

use super::HeightField;

/// Fixed span of the legacy mapping, independent of the grid size.
pub const REFERENCE_SPAN: f32 = 15.0;

/// Maps world-space (x, z) to fractional grid coordinates.
///
/// `grid = world / (span * tile_size) * (dim - 1)`. With a fitted mapping the
/// span equals `dim - 1`, so grid cell `(gx, gz)` sits at world
/// `(gx * tile_size, gz * tile_size)`, matching [`TerrainMesh`](super::TerrainMesh).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapping {
    span_x: f32,
    span_z: f32,
    tile_size: f32,
}

impl GridMapping {
    /// Mapping derived from the field's actual dimensions.
    pub fn fitted(field: &HeightField, tile_size: f32) -> Self {
        Self {
            span_x: (field.width().max(2) - 1) as f32,
            span_z: (field.height().max(2) - 1) as f32,
            tile_size,
        }
    }

    /// Mapping with a fixed span on both axes.
    ///
    /// Only lines up with the mesh when the grid is `span + 1` cells across.
    pub fn reference(span: f32, tile_size: f32) -> Self {
        Self {
            span_x: span,
            span_z: span,
            tile_size,
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Fractional grid coordinates for a world position. Not clamped.
    pub fn to_grid(&self, field: &HeightField, world_x: f32, world_z: f32) -> (f32, f32) {
        let gx = world_x / (self.span_x * self.tile_size) * (field.width() - 1) as f32;
        let gz = world_z / (self.span_z * self.tile_size) * (field.height() - 1) as f32;
        (gx, gz)
    }

    /// World position of a (possibly fractional) grid coordinate.
    pub fn to_world(&self, field: &HeightField, gx: f32, gz: f32) -> (f32, f32) {
        let axis = |g: f32, span: f32, dim: usize| {
            if dim < 2 {
                0.0
            } else {
                g / (dim - 1) as f32 * span * self.tile_size
            }
        };
        (
            axis(gx, self.span_x, field.width()),
            axis(gz, self.span_z, field.height()),
        )
    }
}

/// Split a fractional grid coordinate into a base cell and blend weight.
///
/// The base is clamped so the 2x2 stencil stays inside `dim` cells.
fn split_axis(g: f32, dim: usize) -> (isize, f32) {
    let max_base = dim.saturating_sub(2) as isize;
    let base = (g.floor() as isize).clamp(0, max_base);
    let frac = (g - base as f32).clamp(0.0, 1.0);
    (base, frac)
}

/// Terrain height under a world position, bilinearly interpolated.
///
/// Total for every finite input: positions outside the field take the
/// height of the nearest border cell.
pub fn bilinear_height(
    field: &HeightField,
    mapping: &GridMapping,
    world_x: f32,
    world_z: f32,
) -> f32 {
    let (gx, gz) = mapping.to_grid(field, world_x, world_z);
    let (x0, fx) = split_axis(gx, field.width());
    let (z0, fz) = split_axis(gz, field.height());

    let h00 = field.world_height(x0, z0);
    let h10 = field.world_height(x0 + 1, z0);
    let h01 = field.world_height(x0, z0 + 1);
    let h11 = field.world_height(x0 + 1, z0 + 1);

    h00 * (1.0 - fx) * (1.0 - fz)
        + h10 * fx * (1.0 - fz)
        + h01 * (1.0 - fx) * fz
        + h11 * fx * fz
}
