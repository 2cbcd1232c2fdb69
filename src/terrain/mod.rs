//! Terrain data structures, raster loading, and mesh generation.
//!
//! This module provides:
//! - [`HeightField`] - Normalized elevation grid
//! - [`load_heightmap`] - Grayscale raster decoding
//! - [`TerrainMesh`] - Triangulated surface with per-vertex normals
//! - [`GridMapping`] / [`bilinear_height`] - Continuous height queries

pub mod loader;
pub mod mesh;
pub mod sampler;

pub use loader::{load_heightmap, load_or_default, LoadError};
pub use mesh::{TerrainMesh, Vertex};
pub use sampler::{bilinear_height, GridMapping};

use thiserror::Error;

/// Default world-space height of a sample equal to 1.0.
pub const DEFAULT_VERTICAL_SCALE: f32 = 20.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("Height field has no samples")]
    Empty,
    #[error("Expected {expected} samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },
    #[error("Grid is {width}x{height}, at least 2x2 is required")]
    DegenerateGrid { width: usize, height: usize },
}

/// Normalized elevation grid built from a grayscale raster.
///
/// The coordinate system uses:
/// - X axis: columns (width)
/// - Z axis: rows (height/depth)
/// - Y axis: `sample * vertical_scale`
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    /// Row-major samples in [0, 1], indexed as `samples[z * width + x]`
    samples: Vec<f32>,
    vertical_scale: f32,
}

impl HeightField {
    /// Create a height field from row-major normalized samples.
    ///
    /// Samples outside [0, 1] are clamped and non-finite samples become 0.
    /// Grids narrower than 2 in either direction are accepted here;
    /// [`TerrainMesh::build`] rejects them.
    ///
    /// # Example
    ///
    /// ```
    /// use terrawalk::terrain::HeightField;
    ///
    /// let field = HeightField::from_samples(2, 2, vec![0.0, 1.0, 1.0, 0.0], 20.0).unwrap();
    /// assert_eq!(field.world_height(1, 0), 20.0);
    /// ```
    pub fn from_samples(
        width: usize,
        height: usize,
        samples: Vec<f32>,
        vertical_scale: f32,
    ) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::Empty);
        }
        let expected = width * height;
        if samples.len() != expected {
            return Err(TerrainError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }

        let samples = samples.into_iter().map(normalize).collect();
        Ok(Self {
            width,
            height,
            samples,
            vertical_scale,
        })
    }

    /// A grid where every sample has the same value.
    ///
    /// Zero dimensions are bumped to 1 so the result is always queryable.
    pub fn uniform(width: usize, height: usize, value: f32, vertical_scale: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            samples: vec![normalize(value); width * height],
            vertical_scale,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn vertical_scale(&self) -> f32 {
        self.vertical_scale
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Normalized sample at integer grid indices, clamped to the grid.
    pub fn sample(&self, gx: isize, gz: isize) -> f32 {
        let x = gx.clamp(0, self.width as isize - 1) as usize;
        let z = gz.clamp(0, self.height as isize - 1) as usize;
        self.samples[z * self.width + x]
    }

    /// World-space height at integer grid indices, clamped to the grid.
    pub fn world_height(&self, gx: isize, gz: isize) -> f32 {
        self.sample(gx, gz) * self.vertical_scale
    }

    /// Location and value of the highest sample.
    ///
    /// Ties resolve to the first sample in row-major order.
    pub fn highest_sample(&self) -> (usize, usize, f32) {
        let mut best = (0, 0, self.samples[0]);
        for (i, &s) in self.samples.iter().enumerate() {
            if s > best.2 {
                best = (i % self.width, i / self.width, s);
            }
        }
        best
    }

    /// Returns the minimum and maximum normalized samples.
    pub fn height_bounds(&self) -> (f32, f32) {
        self.samples
            .iter()
            .fold((f32::MAX, f32::MIN), |(min, max), &s| (min.min(s), max.max(s)))
    }
}

/// Clamp into [0, 1]; NaN and infinities map to 0.
fn normalize(s: f32) -> f32 {
    if s.is_finite() {
        s.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples() {
        let field = HeightField::from_samples(3, 2, vec![0.0, 0.5, 1.0, 0.25, 0.75, 0.0], 20.0)
            .unwrap();

        assert_eq!(field.width(), 3);
        assert_eq!(field.height(), 2);
        assert_eq!(field.sample(1, 0), 0.5);
        assert_eq!(field.sample(0, 1), 0.25);
        assert_eq!(field.world_height(2, 0), 20.0);
    }

    #[test]
    fn test_from_samples_clamps_values() {
        let field = HeightField::from_samples(2, 1, vec![-0.5, 1.5], 10.0).unwrap();
        assert_eq!(field.samples(), &[0.0, 1.0]);
    }

    #[test]
    fn test_from_samples_replaces_non_finite() {
        let samples = vec![f32::NAN, 0.5, f32::INFINITY, f32::NEG_INFINITY];
        let field = HeightField::from_samples(2, 2, samples, 20.0).unwrap();

        assert_eq!(field.samples(), &[0.0, 0.5, 0.0, 0.0]);
        assert_eq!(field.height_bounds(), (0.0, 0.5));
        assert_eq!(HeightField::uniform(2, 2, f32::NAN, 20.0).sample(1, 1), 0.0);
    }

    #[test]
    fn test_from_samples_rejects_empty() {
        let result = HeightField::from_samples(0, 4, vec![], 20.0);
        assert_eq!(result, Err(TerrainError::Empty));
    }

    #[test]
    fn test_from_samples_rejects_wrong_count() {
        let result = HeightField::from_samples(2, 2, vec![0.0; 3], 20.0);
        assert!(matches!(
            result,
            Err(TerrainError::SampleCount {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_single_row_is_accepted() {
        let field = HeightField::from_samples(4, 1, vec![0.1, 0.2, 0.3, 0.4], 1.0).unwrap();
        assert_eq!(field.height(), 1);
        assert_eq!(field.sample(3, 5), 0.4);
    }

    #[test]
    fn test_sample_clamps_indices() {
        let field = HeightField::from_samples(2, 2, vec![0.1, 0.2, 0.3, 0.4], 20.0).unwrap();

        assert_eq!(field.sample(-3, -3), 0.1);
        assert_eq!(field.sample(10, -1), 0.2);
        assert_eq!(field.sample(-1, 10), 0.3);
        assert_eq!(field.sample(99, 99), 0.4);
    }

    #[test]
    fn test_highest_sample_first_wins() {
        let field =
            HeightField::from_samples(3, 2, vec![0.2, 0.9, 0.1, 0.9, 0.3, 0.0], 20.0).unwrap();
        assert_eq!(field.highest_sample(), (1, 0, 0.9));
    }

    #[test]
    fn test_highest_sample_flat() {
        let field = HeightField::uniform(4, 4, 0.5, 20.0);
        assert_eq!(field.highest_sample(), (0, 0, 0.5));
    }

    #[test]
    fn test_height_bounds() {
        let field = HeightField::from_samples(2, 2, vec![0.4, 0.1, 0.8, 0.3], 20.0).unwrap();
        assert_eq!(field.height_bounds(), (0.1, 0.8));
    }

    #[test]
    fn test_uniform_never_empty() {
        let field = HeightField::uniform(0, 0, 0.5, 20.0);
        assert_eq!(field.width(), 1);
        assert_eq!(field.height(), 1);
        assert_eq!(field.sample(0, 0), 0.5);
    }
}
