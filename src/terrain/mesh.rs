use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::{HeightField, TerrainError};

/// Vertex data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// Triangulated terrain surface, one vertex per grid cell.
///
/// `indices` is a triangle list: every three consecutive entries form one
/// triangle, counter-clockwise when viewed from above.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Vertical component of every unnormalized normal. Larger values flatten shading.
    pub const SLOPE_CONSTANT: f32 = 2.0;

    /// Generate the mesh for a height field.
    /// tile_size: world-space distance between adjacent grid cells
    pub fn build(field: &HeightField, tile_size: f32) -> Result<Self, TerrainError> {
        let (width, height) = (field.width(), field.height());
        if width < 2 || height < 2 {
            return Err(TerrainError::DegenerateGrid { width, height });
        }

        let mut vertices = Vec::with_capacity(width * height);
        for z in 0..height {
            for x in 0..width {
                let y = field.world_height(x as isize, z as isize);
                vertices.push(Vertex {
                    position: [x as f32 * tile_size, y, z as f32 * tile_size],
                    normal: [0.0, 1.0, 0.0],
                    tex_coord: [
                        x as f32 / (width - 1) as f32,
                        z as f32 / (height - 1) as f32,
                    ],
                });
            }
        }

        // Normals need every neighbor height, so they run as a second pass
        for z in 0..height {
            for x in 0..width {
                vertices[z * width + x].normal = estimate_normal(field, x, z).to_array();
            }
        }

        let mut indices = Vec::with_capacity((width - 1) * (height - 1) * 6);
        for z in 0..height - 1 {
            for x in 0..width - 1 {
                let top_left = (z * width + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * width + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[top_left, bottom_left, top_right]);
                indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
            }
        }

        log::debug!(
            "Built terrain mesh: {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );
        Ok(Self { vertices, indices })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Raw vertex bytes for a GPU buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for a GPU buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Central-difference normal with clamp-to-edge neighbors.
fn estimate_normal(field: &HeightField, x: usize, z: usize) -> Vec3 {
    let (x, z) = (x as isize, z as isize);
    let h_left = field.world_height(x - 1, z);
    let h_right = field.world_height(x + 1, z);
    let h_up = field.world_height(x, z - 1);
    let h_down = field.world_height(x, z + 1);

    Vec3::new(
        h_left - h_right,
        TerrainMesh::SLOPE_CONSTANT,
        h_up - h_down,
    )
    .normalize()
}
