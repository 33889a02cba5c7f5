// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas redraw pass.
//!
//! Every redraw starts from the bare photo and paints each placed item in
//! insertion order, so later placements cover earlier ones. All thumbnails
//! a pass needs are resolved before the first one is painted.

use crate::io::thumbnails::ThumbnailSource;
use crate::models::{placement::PlacedItem, session::Photo};
use image::{imageops, imageops::FilterType, RgbaImage};
use std::collections::HashMap;

/// Paints placed products over the photo, caching decoded thumbnails.
#[derive(Default)]
pub struct Compositor {
    /// Decoded thumbnails by image path. `None` marks a path that failed.
    cache: HashMap<String, Option<RgbaImage>>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget cached thumbnails, including failed lookups.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Produce a fresh canvas: the photo, then every item in order.
    pub fn redraw(
        &mut self,
        photo: &Photo,
        items: &[PlacedItem],
        source: &dyn ThumbnailSource,
    ) -> RgbaImage {
        self.gather(items, source);

        let mut canvas = photo.image.clone();
        for item in items {
            match self.cache.get(&item.image_url) {
                Some(Some(thumbnail)) => draw_item(&mut canvas, thumbnail, item),
                _ => log::debug!("Skipping undrawable item {}", item.name),
            }
        }
        canvas
    }

    fn gather(&mut self, items: &[PlacedItem], source: &dyn ThumbnailSource) {
        for item in items {
            if self.cache.contains_key(&item.image_url) {
                continue;
            }
            let thumbnail = match source.load(&item.image_url) {
                Ok(thumbnail) => Some(thumbnail),
                Err(e) => {
                    log::warn!("Failed to load thumbnail {}: {}", item.image_url, e);
                    None
                }
            };
            self.cache.insert(item.image_url.clone(), thumbnail);
        }
    }
}

/// Draw one item, scaled to its size and anchored on its point. The scaled
/// thumbnail never exceeds the canvas.
fn draw_item(canvas: &mut RgbaImage, thumbnail: &RgbaImage, item: &PlacedItem) {
    let rect = item.bounds();
    if !(rect.width.is_finite() && rect.height.is_finite()) {
        log::debug!("Skipping item {} with unbounded size", item.name);
        return;
    }
    let width = rect.width.round().clamp(1.0, canvas.width() as f32) as u32;
    let height = rect.height.round().clamp(1.0, canvas.height() as f32) as u32;

    let scaled = imageops::resize(thumbnail, width, height, FilterType::Triangle);
    imageops::overlay(canvas, &scaled, rect.x.round() as i64, rect.y.round() as i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::thumbnails::MemoryThumbnails;
    use crate::models::product::find_product;
    use image::Rgba;

    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

    fn photo() -> Photo {
        Photo::new("room.png".to_string(), RgbaImage::from_pixel(400, 400, BLUE))
    }

    fn item(name: &str, x: f32, y: f32) -> PlacedItem {
        PlacedItem::new(&find_product(name).unwrap(), x, y, 150.0, 200.0)
    }

    fn source() -> MemoryThumbnails {
        MemoryThumbnails::default()
            .with("/images/product-5.jpg", RgbaImage::from_pixel(8, 8, RED))
            .with("/images/product-1.jpg", RgbaImage::from_pixel(8, 8, GREEN))
    }

    #[test]
    fn test_redraw_without_items_is_photo() {
        let mut compositor = Compositor::new();
        let canvas = compositor.redraw(&photo(), &[], &source());
        assert_eq!(canvas, photo().image);
    }

    #[test]
    fn test_item_drawn_above_its_point() {
        let mut compositor = Compositor::new();
        let items = vec![item("Jade Garden Vase", 120.0, 340.0)];
        let canvas = compositor.redraw(&photo(), &items, &source());

        // Drawn into x 45..195, y 140..340
        assert_eq!(canvas.get_pixel(120, 300), &RED);
        assert_eq!(canvas.get_pixel(46, 141), &RED);
        assert_eq!(canvas.get_pixel(120, 345), &BLUE);
        assert_eq!(canvas.get_pixel(40, 300), &BLUE);
    }

    #[test]
    fn test_later_items_draw_on_top() {
        let mut compositor = Compositor::new();
        let items = vec![
            item("Jade Garden Vase", 200.0, 300.0),
            item("Kyoto Ceramic Planter", 200.0, 300.0),
        ];
        let canvas = compositor.redraw(&photo(), &items, &source());
        assert_eq!(canvas.get_pixel(200, 200), &GREEN);

        let reversed: Vec<_> = items.into_iter().rev().collect();
        let canvas = compositor.redraw(&photo(), &reversed, &source());
        assert_eq!(canvas.get_pixel(200, 200), &RED);
    }

    #[test]
    fn test_missing_thumbnail_leaves_item_undrawn() {
        let mut compositor = Compositor::new();
        let items = vec![
            item("Jade Garden Vase", 100.0, 250.0),
            item("Hanging Garden Set", 300.0, 250.0),
        ];
        let canvas = compositor.redraw(&photo(), &items, &source());
        assert_eq!(canvas.get_pixel(100, 150), &RED);
        assert_eq!(canvas.get_pixel(300, 150), &BLUE);
    }

    #[test]
    fn test_thumbnails_are_cached_between_passes() {
        let mut compositor = Compositor::new();
        let thumbnails = source();
        let items = vec![
            item("Jade Garden Vase", 100.0, 250.0),
            item("Jade Garden Vase", 300.0, 250.0),
        ];
        compositor.redraw(&photo(), &items, &thumbnails);
        compositor.redraw(&photo(), &items, &thumbnails);
        assert_eq!(thumbnails.loads(), 1);

        compositor.clear_cache();
        compositor.redraw(&photo(), &items, &thumbnails);
        assert_eq!(thumbnails.loads(), 2);
    }

    #[test]
    fn test_item_partly_off_canvas() {
        let mut compositor = Compositor::new();
        let items = vec![item("Jade Garden Vase", 0.0, 100.0)];
        let canvas = compositor.redraw(&photo(), &items, &source());
        assert_eq!(canvas.dimensions(), (400, 400));
        assert_eq!(canvas.get_pixel(10, 50), &RED);
    }

    #[test]
    fn test_oversized_item_is_capped_to_canvas() {
        let mut compositor = Compositor::new();
        let mut huge = item("Jade Garden Vase", 200.0, 400.0);
        huge.width = 1.0e6;
        huge.height = 1.0e6;

        let canvas = compositor.redraw(&photo(), &[huge], &source());
        assert_eq!(canvas.dimensions(), (400, 400));
        assert_eq!(canvas.get_pixel(200, 200), &BLUE);
    }

    #[test]
    fn test_non_finite_item_is_skipped() {
        let mut compositor = Compositor::new();
        let mut broken = item("Jade Garden Vase", 200.0, 300.0);
        broken.width = f32::NAN;

        let canvas = compositor.redraw(&photo(), &[broken], &source());
        assert_eq!(canvas, photo().image);
    }
}
