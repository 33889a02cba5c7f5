// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Product thumbnail lookup.

use crate::error::VisualizerResult;
use image::RgbaImage;
use std::path::PathBuf;

/// Resolves a product image path to pixels.
pub trait ThumbnailSource {
    fn load(&self, image_url: &str) -> VisualizerResult<RgbaImage>;
}

/// Thumbnails stored under an asset directory.
///
/// `/images/product-1.jpg` resolves to `<root>/images/product-1.jpg`.
pub struct AssetDirectory {
    root: PathBuf,
}

impl AssetDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, image_url: &str) -> PathBuf {
        self.root.join(image_url.trim_start_matches('/'))
    }
}

impl ThumbnailSource for AssetDirectory {
    fn load(&self, image_url: &str) -> VisualizerResult<RgbaImage> {
        let path = self.resolve(image_url);
        let bytes = std::fs::read(&path)?;
        let img = image::load_from_memory(&bytes).map_err(|e| {
            crate::error::VisualizerError::decode(format!("{}: {}", path.display(), e))
        })?;
        Ok(img.to_rgba8())
    }
}

/// In-memory thumbnails keyed by image path.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryThumbnails {
    images: std::collections::HashMap<String, RgbaImage>,
    loads: std::cell::Cell<usize>,
}

#[cfg(test)]
impl MemoryThumbnails {
    pub fn with(mut self, image_url: &str, image: RgbaImage) -> Self {
        self.images.insert(image_url.to_string(), image);
        self
    }

    /// Number of `load` calls served so far.
    pub fn loads(&self) -> usize {
        self.loads.get()
    }
}

#[cfg(test)]
impl ThumbnailSource for MemoryThumbnails {
    fn load(&self, image_url: &str) -> VisualizerResult<RgbaImage> {
        self.loads.set(self.loads.get() + 1);
        self.images.get(image_url).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, image_url.to_string()).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba};

    #[test]
    fn test_asset_directory_strips_leading_slash() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        let thumb = RgbaImage::from_pixel(3, 5, Rgba([10, 200, 30, 255]));
        DynamicImage::ImageRgba8(thumb)
            .save_with_format(dir.path().join("images/product-5.jpg"), ImageFormat::Png)
            .unwrap();

        let source = AssetDirectory::new(dir.path());
        let loaded = source.load("/images/product-5.jpg").unwrap();
        assert_eq!(loaded.dimensions(), (3, 5));
        assert_eq!(loaded.get_pixel(1, 1), &Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn test_asset_directory_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = AssetDirectory::new(dir.path());
        assert!(source.load("/images/missing.jpg").is_err());
    }
}
