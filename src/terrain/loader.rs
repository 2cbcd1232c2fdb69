use std::path::{Path, PathBuf};

use image::GrayImage;
use thiserror::Error;

use super::HeightField;

/// Side length of the grid substituted when a heightmap cannot be loaded.
pub const FALLBACK_SIZE: usize = 15;
/// Raw 8-bit intensity of every fallback sample.
pub const FALLBACK_LEVEL: u8 = 128;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot load heightmap {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Heightmap {path} is empty")]
    Empty { path: PathBuf },
}

/// Decode a grayscale heightmap from disk.
///
/// Color images are converted to 8-bit luma; each pixel becomes `value / 255`.
pub fn load_heightmap<P: AsRef<Path>>(
    path: P,
    vertical_scale: f32,
) -> Result<HeightField, LoadError> {
    let path = path.as_ref();
    log::info!("Loading heightmap: {}", path.display());

    let image = image::open(path)
        .map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();

    let field = from_luma(&image, vertical_scale).ok_or_else(|| LoadError::Empty {
        path: path.to_path_buf(),
    })?;

    let (gx, gz, peak) = field.highest_sample();
    log::info!(
        "Heightmap loaded: {}x{}, highest sample {} at ({}, {})",
        field.width(),
        field.height(),
        (peak * 255.0).round() as u8,
        gx,
        gz
    );
    Ok(field)
}

/// Load a heightmap, substituting a flat mid-gray grid on failure.
pub fn load_or_default<P: AsRef<Path>>(path: P, vertical_scale: f32) -> HeightField {
    match load_heightmap(path, vertical_scale) {
        Ok(field) => field,
        Err(e) => {
            log::warn!("{e}");
            log::warn!("Using default heightmap: {FALLBACK_SIZE}x{FALLBACK_SIZE}");
            fallback(vertical_scale)
        }
    }
}

/// The neutral grid used when no heightmap is available.
pub fn fallback(vertical_scale: f32) -> HeightField {
    HeightField::uniform(
        FALLBACK_SIZE,
        FALLBACK_SIZE,
        FALLBACK_LEVEL as f32 / 255.0,
        vertical_scale,
    )
}

/// Build a height field from an 8-bit luma raster. `None` for a zero-sized image.
pub fn from_luma(image: &GrayImage, vertical_scale: f32) -> Option<HeightField> {
    let samples = image.pixels().map(|p| p.0[0] as f32 / 255.0).collect();
    HeightField::from_samples(
        image.width() as usize,
        image.height() as usize,
        samples,
        vertical_scale,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn write_png(dir: &tempfile::TempDir, name: &str, image: &GrayImage) -> PathBuf {
        let path = dir.path().join(name);
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut image = GrayImage::new(3, 2);
        image.put_pixel(0, 0, Luma([0]));
        image.put_pixel(2, 1, Luma([255]));
        image.put_pixel(1, 0, Luma([51]));
        let path = write_png(&dir, "terrain.png", &image);

        let field = load_heightmap(&path, 20.0).unwrap();

        assert_eq!(field.width(), 3);
        assert_eq!(field.height(), 2);
        assert_eq!(field.sample(0, 0), 0.0);
        assert!((field.sample(1, 0) - 0.2).abs() < 1e-6);
        assert_eq!(field.sample(2, 1), 1.0);
        assert_eq!(field.world_height(2, 1), 20.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_heightmap(dir.path().join("missing.png"), 20.0);

        assert!(matches!(result, Err(LoadError::Decode { .. })));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = load_heightmap(&path, 20.0);
        assert!(matches!(result, Err(LoadError::Decode { .. })));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let field = load_or_default(dir.path().join("missing.png"), 20.0);

        assert_eq!(field.width(), FALLBACK_SIZE);
        assert_eq!(field.height(), FALLBACK_SIZE);
        assert_eq!(field.height_bounds(), (128.0 / 255.0, 128.0 / 255.0));
    }

    #[test]
    fn test_load_or_default_uses_file() {
        let dir = tempfile::tempdir().unwrap();
        let image = GrayImage::from_pixel(4, 4, Luma([255]));
        let path = write_png(&dir, "peak.png", &image);

        let field = load_or_default(&path, 10.0);
        assert_eq!(field.width(), 4);
        assert_eq!(field.world_height(3, 3), 10.0);
    }

    #[test]
    fn test_from_luma_empty() {
        let image = GrayImage::new(0, 0);
        assert!(from_luma(&image, 20.0).is_none());
    }
}
