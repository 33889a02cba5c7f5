// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Vase placement tool.
//!
//! [`Visualizer`] owns the photo session and implements every user
//! operation: loading a photo, picking a recommended product, placing it,
//! resetting, starting over and exporting. It talks to the screen only
//! through a [`PresentationShell`], so it runs the same under the GUI and
//! under tests.

use crate::config::VisualizerConfig;
use crate::error::{VisualizerError, VisualizerResult};
use crate::io::{
    media::{decode_upload, ImageFile},
    serialization::encode_png,
    thumbnails::ThumbnailSource,
};
use crate::models::{
    placement::PlacedItem,
    product::{catalog, find_product, Product},
    session::{Photo, PlacementSheet, Session},
};
use crate::recommend::{Recommendation, RecommendationPolicy};
use crate::render::compositor::Compositor;
use crate::shell::{PresentationShell, Region, DRAG_HELP_TEXT, PLACE_HELP_TEXT};
use image::RgbaImage;

pub struct Visualizer<S: PresentationShell> {
    config: VisualizerConfig,

    /// Photo, placements and pending selection
    session: Session,

    /// Products the recommendations are drawn from
    catalog: Vec<Product>,

    /// Products currently suggested for the photo
    recommendations: Vec<Recommendation>,

    policy: Box<dyn RecommendationPolicy>,
    thumbnails: Box<dyn ThumbnailSource>,
    compositor: Compositor,

    /// Composited photo and placements, rebuilt on every mutation
    canvas: Option<RgbaImage>,

    /// Bumped whenever `canvas` changes
    revision: u64,

    shell: S,
}

impl<S: PresentationShell> Visualizer<S> {
    /// Create a visualizer awaiting its first upload.
    pub fn new(
        config: VisualizerConfig,
        mut shell: S,
        policy: Box<dyn RecommendationPolicy>,
        thumbnails: Box<dyn ThumbnailSource>,
    ) -> Self {
        show_awaiting_upload(&mut shell);
        Self {
            config,
            session: Session::default(),
            catalog: catalog(),
            recommendations: Vec::new(),
            policy,
            thumbnails,
            compositor: Compositor::new(),
            canvas: None,
            revision: 0,
            shell,
        }
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn placed_items(&self) -> &[PlacedItem] {
        &self.session.placed_items
    }

    pub fn pending_selection(&self) -> Option<&Product> {
        self.session.pending_selection.as_ref()
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// The composited canvas, if a photo is loaded.
    pub fn canvas(&self) -> Option<&RgbaImage> {
        self.canvas.as_ref()
    }

    /// Changes whenever the canvas is redrawn or dropped.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Load an uploaded file as the active photo.
    ///
    /// On failure the user is alerted and the current session is kept.
    pub fn load_image(&mut self, file: &ImageFile) -> VisualizerResult<()> {
        let result = decode_upload(
            file,
            self.config.max_canvas_width,
            self.config.max_canvas_height,
        );
        match result {
            Ok(photo) => {
                self.install_photo(photo);
                Ok(())
            }
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    /// Start a new session on an already decoded photo.
    pub fn install_photo(&mut self, photo: Photo) {
        log::info!(
            "Loaded photo {} ({}x{})",
            photo.source_name,
            photo.width(),
            photo.height()
        );
        self.session.install_photo(photo);

        self.shell.set_visible(Region::UploadArea, false);
        self.shell.set_visible(Region::Canvas, true);
        self.shell.set_visible(Region::Controls, true);
        self.shell.set_visible(Region::RecommendationsPanel, true);
        self.show_idle_selection();

        self.generate_recommendations();
        self.redraw();
    }

    /// Tell the user an operation failed. State is left untouched.
    pub fn report_error(&mut self, err: &VisualizerError) {
        log::error!("{}", err);
        self.shell.alert(&err.user_message());
    }

    /// Replace the suggested products with a fresh placeholder pick.
    pub fn generate_recommendations(&mut self) {
        self.recommendations = self
            .policy
            .recommend(&self.catalog, self.config.recommendation_count);
        log::info!("Generated {} recommendations", self.recommendations.len());
    }

    /// Make `product` the one awaiting a placement point.
    pub fn select_product(&mut self, product: Product) {
        log::info!("Selected {}", product.name);
        self.shell.highlight_product(Some(&product.name));
        self.shell.set_help_text(PLACE_HELP_TEXT);
        self.session.pending_selection = Some(product);
    }

    /// Drop the pending selection without placing it.
    pub fn clear_selection(&mut self) {
        if self.session.pending_selection.take().is_some() {
            log::info!("Cleared selection");
        }
        self.show_idle_selection();
    }

    /// Place the pending product at canvas point `(x, y)`.
    ///
    /// Clicking with nothing selected, or before a photo is loaded, is an
    /// ordinary idle click and does nothing.
    pub fn place_at(&mut self, x: f32, y: f32) -> Option<&PlacedItem> {
        match self.try_place(x, y) {
            Ok(()) => self.session.placed_items.last(),
            Err(e) if e.is_idle_click() => {
                log::debug!("Ignored click at ({:.1}, {:.1}): {}", x, y, e);
                None
            }
            Err(e) => {
                self.report_error(&e);
                None
            }
        }
    }

    /// Place a product card dropped on the canvas at `(x, y)`.
    ///
    /// Same result as selecting the product and then clicking the point.
    pub fn drop_product(&mut self, product: Product, x: f32, y: f32) -> Option<&PlacedItem> {
        self.select_product(product);
        self.place_at(x, y)
    }

    fn try_place(&mut self, x: f32, y: f32) -> VisualizerResult<()> {
        if !self.session.has_photo() {
            return Err(VisualizerError::NoActivePhoto);
        }
        let product = self
            .session
            .pending_selection
            .take()
            .ok_or(VisualizerError::NoPendingSelection)?;

        let item = PlacedItem::new(
            &product,
            x,
            y,
            self.config.item_width,
            self.config.item_height,
        );
        self.session.placed_items.push(item);
        log::info!(
            "Placed {} at ({:.1}, {:.1}), total: {}",
            product.name,
            x,
            y,
            self.session.placed_items.len()
        );

        self.show_idle_selection();
        self.redraw();
        Ok(())
    }

    /// Remove every placement but keep the photo.
    pub fn reset(&mut self) {
        self.session.placed_items.clear();
        log::info!("Reset placements");
        self.redraw();
    }

    /// Drop the photo and return to the upload screen.
    pub fn new_image(&mut self) {
        self.session.clear();
        self.recommendations.clear();
        self.compositor.clear_cache();
        self.canvas = None;
        self.revision += 1;
        show_awaiting_upload(&mut self.shell);
        log::info!("Awaiting new image");
    }

    /// Encode the composited canvas as PNG.
    pub fn export_png(&self) -> VisualizerResult<Vec<u8>> {
        let canvas = self.canvas.as_ref().ok_or(VisualizerError::NoActivePhoto)?;
        let bytes = encode_png(canvas)?;
        log::info!("Exported {} byte PNG", bytes.len());
        Ok(bytes)
    }

    /// Snapshot of the current placements for saving.
    pub fn placement_sheet(&self) -> VisualizerResult<PlacementSheet> {
        PlacementSheet::from_session(&self.session).ok_or(VisualizerError::NoActivePhoto)
    }

    /// Replace the current placements with those of a saved sheet.
    pub fn restore_placements(&mut self, sheet: PlacementSheet) -> VisualizerResult<()> {
        let photo = self
            .session
            .uploaded_image
            .as_ref()
            .ok_or(VisualizerError::NoActivePhoto)?;
        if (sheet.canvas_width, sheet.canvas_height) != (photo.width(), photo.height()) {
            log::warn!(
                "Placements were made on a {}x{} canvas, current canvas is {}x{}",
                sheet.canvas_width,
                sheet.canvas_height,
                photo.width(),
                photo.height()
            );
        }

        let max_width = (photo.width() as f32).max(self.config.item_width);
        let max_height = (photo.height() as f32).max(self.config.item_height);
        for item in &sheet.placed_items {
            check_placement(item, max_width, max_height)?;
        }

        for item in &sheet.placed_items {
            if find_product(&item.name).is_none() {
                log::warn!("Restored placement {} is not in the catalog", item.name);
            }
        }
        self.session.placed_items = sheet.placed_items;
        self.session.pending_selection = None;
        log::info!("Restored {} placements", self.session.placed_items.len());
        self.show_idle_selection();
        self.redraw();
        Ok(())
    }

    fn show_idle_selection(&mut self) {
        self.shell.highlight_product(None);
        self.shell.set_help_text(DRAG_HELP_TEXT);
    }

    fn redraw(&mut self) {
        if let Some(ref photo) = self.session.uploaded_image {
            let canvas =
                self.compositor
                    .redraw(photo, &self.session.placed_items, self.thumbnails.as_ref());
            self.canvas = Some(canvas);
            self.revision += 1;
        }
    }
}

/// Reject items that are not on a finite point or are not drawable at a
/// size up to `max_width` x `max_height`.
fn check_placement(item: &PlacedItem, max_width: f32, max_height: f32) -> VisualizerResult<()> {
    if !item.x.is_finite() || !item.y.is_finite() {
        return Err(VisualizerError::InvalidPlacement(format!(
            "{} is not at a finite point",
            item.name
        )));
    }
    let size_ok = |v: f32, max: f32| v.is_finite() && v > 0.0 && v <= max;
    if !size_ok(item.width, max_width) || !size_ok(item.height, max_height) {
        return Err(VisualizerError::InvalidPlacement(format!(
            "{} has size {}x{}, limit is {}x{}",
            item.name, item.width, item.height, max_width, max_height
        )));
    }
    Ok(())
}

fn show_awaiting_upload<S: PresentationShell>(shell: &mut S) {
    shell.set_visible(Region::UploadArea, true);
    shell.set_visible(Region::Canvas, false);
    shell.set_visible(Region::Controls, false);
    shell.set_visible(Region::RecommendationsPanel, false);
    shell.highlight_product(None);
    shell.set_help_text(DRAG_HELP_TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::thumbnails::MemoryThumbnails;
    use crate::recommend::MockRecommender;
    use crate::shell::ShellState;
    use image::{DynamicImage, ImageFormat, Rgba};
    use std::io::Cursor;

    const PHOTO_COLOR: Rgba<u8> = Rgba([30, 60, 90, 255]);
    const JADE: Rgba<u8> = Rgba([90, 160, 110, 255]);

    fn visualizer() -> Visualizer<ShellState> {
        let thumbnails = MemoryThumbnails::default()
            .with("/images/product-5.jpg", RgbaImage::from_pixel(6, 8, JADE));
        Visualizer::new(
            VisualizerConfig::default(),
            ShellState::new(),
            Box::new(MockRecommender::seeded(11)),
            Box::new(thumbnails),
        )
    }

    fn photo_file(width: u32, height: u32) -> ImageFile {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, PHOTO_COLOR));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        ImageFile::new("room.png", "image/png", buffer.into_inner())
    }

    fn loaded() -> Visualizer<ShellState> {
        let mut vis = visualizer();
        vis.load_image(&photo_file(2000, 1000)).unwrap();
        vis
    }

    #[test]
    fn test_starts_awaiting_upload() {
        let vis = visualizer();
        assert!(vis.shell().is_visible(Region::UploadArea));
        assert!(!vis.shell().is_visible(Region::Canvas));
        assert!(vis.canvas().is_none());
        assert!(vis.recommendations().is_empty());
    }

    #[test]
    fn test_load_scales_into_bounding_box() {
        let vis = loaded();
        let photo = vis.session().uploaded_image.as_ref().unwrap();
        assert_eq!((photo.width(), photo.height()), (1000, 500));
        assert_eq!(vis.canvas().unwrap().dimensions(), (1000, 500));
    }

    #[test]
    fn test_load_reveals_interface_and_recommends() {
        let vis = loaded();
        let shell = vis.shell();
        assert!(!shell.is_visible(Region::UploadArea));
        assert!(shell.is_visible(Region::Canvas));
        assert!(shell.is_visible(Region::Controls));
        assert!(shell.is_visible(Region::RecommendationsPanel));
        assert_eq!(vis.recommendations().len(), 4);
    }

    #[test]
    fn test_load_text_file_alerts_and_keeps_state() {
        let mut vis = visualizer();
        let file = ImageFile::new("notes.txt", "text/plain", b"hello".to_vec());
        let result = vis.load_image(&file);

        assert!(matches!(
            result,
            Err(VisualizerError::UnsupportedFileType { .. })
        ));
        assert!(vis.session().uploaded_image.is_none());
        assert!(vis.shell().is_visible(Region::UploadArea));
        let alert = vis.shell_mut().take_alert().unwrap();
        assert!(alert.contains("image file"));
    }

    #[test]
    fn test_failed_load_keeps_previous_session() {
        let mut vis = loaded();
        vis.select_product(find_product("Jade Garden Vase").unwrap());
        vis.place_at(500.0, 400.0);

        let broken = ImageFile::new("broken.png", "image/png", b"garbage".to_vec());
        assert!(matches!(
            vis.load_image(&broken),
            Err(VisualizerError::DecodeFailure(_))
        ));
        assert_eq!(vis.placed_items().len(), 1);
        assert_eq!(
            vis.session().uploaded_image.as_ref().unwrap().source_name,
            "room.png"
        );
        assert!(vis.shell_mut().take_alert().is_some());
    }

    #[test]
    fn test_load_then_reset() {
        let mut vis = loaded();
        vis.reset();
        assert!(vis.placed_items().is_empty());
        assert!(vis.session().has_photo());
        assert!(vis.shell().is_visible(Region::Canvas));
        assert_eq!(vis.canvas().unwrap().get_pixel(500, 250), &PHOTO_COLOR);
    }

    #[test]
    fn test_place_jade_garden_vase() {
        let mut vis = loaded();
        vis.select_product(find_product("Jade Garden Vase").unwrap());
        let item = vis.place_at(120.0, 340.0).cloned().unwrap();

        assert_eq!(
            item,
            PlacedItem {
                x: 120.0,
                y: 340.0,
                width: 150.0,
                height: 200.0,
                image_url: "/images/product-5.jpg".to_string(),
                name: "Jade Garden Vase".to_string(),
            }
        );
        assert_eq!(vis.placed_items(), &[item]);
        assert!(vis.pending_selection().is_none());
        assert_eq!(vis.canvas().unwrap().get_pixel(120, 300), &JADE);
    }

    #[test]
    fn test_each_placement_uses_its_selection() {
        let mut vis = loaded();
        let picks = ["Kyoto Ceramic Planter", "Jade Garden Vase", "Hanging Garden Set"];
        for (i, name) in picks.iter().enumerate() {
            vis.select_product(find_product(name).unwrap());
            vis.place_at(100.0 * (i + 1) as f32, 300.0);
        }

        assert_eq!(vis.placed_items().len(), picks.len());
        for (item, name) in vis.placed_items().iter().zip(picks) {
            let product = find_product(name).unwrap();
            assert_eq!(item.name, product.name);
            assert_eq!(item.image_url, product.image_url);
        }
    }

    #[test]
    fn test_place_without_selection_is_noop() {
        let mut vis = loaded();
        let revision = vis.revision();
        assert!(vis.place_at(10.0, 10.0).is_none());
        assert!(vis.placed_items().is_empty());
        assert_eq!(vis.revision(), revision);
        assert!(vis.shell_mut().take_alert().is_none());
    }

    #[test]
    fn test_place_without_photo_is_noop() {
        let mut vis = visualizer();
        vis.select_product(find_product("Jade Garden Vase").unwrap());
        assert!(vis.place_at(10.0, 10.0).is_none());
        assert!(vis.placed_items().is_empty());
        assert!(vis.pending_selection().is_some());
        assert!(vis.shell_mut().take_alert().is_none());
    }

    #[test]
    fn test_selecting_replaces_pending_product() {
        let mut vis = loaded();
        vis.select_product(find_product("Kyoto Ceramic Planter").unwrap());
        vis.select_product(find_product("Architectural Series").unwrap());
        assert_eq!(vis.pending_selection().unwrap().name, "Architectural Series");
        assert_eq!(vis.shell().highlighted(), Some("Architectural Series"));
        assert_eq!(vis.shell().help_text(), PLACE_HELP_TEXT);

        vis.place_at(300.0, 300.0);
        assert_eq!(vis.placed_items()[0].name, "Architectural Series");
        assert_eq!(vis.shell().highlighted(), None);
        assert_eq!(vis.shell().help_text(), DRAG_HELP_TEXT);
    }

    #[test]
    fn test_clear_selection() {
        let mut vis = loaded();
        vis.select_product(find_product("Kyoto Ceramic Planter").unwrap());
        vis.clear_selection();
        assert!(vis.pending_selection().is_none());
        assert!(vis.place_at(300.0, 300.0).is_none());
        assert_eq!(vis.shell().help_text(), DRAG_HELP_TEXT);
    }

    #[test]
    fn test_new_image_discards_everything() {
        let mut vis = loaded();
        vis.select_product(find_product("Jade Garden Vase").unwrap());
        vis.place_at(120.0, 340.0);
        vis.select_product(find_product("Kyoto Ceramic Planter").unwrap());

        vis.new_image();
        assert!(vis.placed_items().is_empty());
        assert!(vis.session().uploaded_image.is_none());
        assert!(vis.pending_selection().is_none());
        assert!(vis.canvas().is_none());
        assert!(vis.shell().is_visible(Region::UploadArea));
        assert!(!vis.shell().is_visible(Region::Canvas));
        assert!(!vis.shell().is_visible(Region::Controls));
        assert!(!vis.shell().is_visible(Region::RecommendationsPanel));
    }

    #[test]
    fn test_new_image_from_fresh_state() {
        let mut vis = visualizer();
        vis.new_image();
        assert!(vis.placed_items().is_empty());
        assert!(vis.session().uploaded_image.is_none());
    }

    #[test]
    fn test_loading_new_photo_clears_placements() {
        let mut vis = loaded();
        vis.select_product(find_product("Jade Garden Vase").unwrap());
        vis.place_at(120.0, 340.0);

        vis.load_image(&photo_file(640, 480)).unwrap();
        assert!(vis.placed_items().is_empty());
        assert_eq!(vis.canvas().unwrap().dimensions(), (640, 480));
    }

    #[test]
    fn test_export_png_contains_placements() {
        let mut vis = loaded();
        vis.select_product(find_product("Jade Garden Vase").unwrap());
        vis.place_at(120.0, 340.0);

        let bytes = vis.export_png().unwrap();
        let exported = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(exported.dimensions(), (1000, 500));
        assert_eq!(exported.get_pixel(120, 300), &JADE);
        assert_eq!(exported.get_pixel(800, 400), &PHOTO_COLOR);
    }

    #[test]
    fn test_export_without_photo_fails() {
        let vis = visualizer();
        assert!(matches!(
            vis.export_png(),
            Err(VisualizerError::NoActivePhoto)
        ));
    }

    #[test]
    fn test_restore_placements() {
        let mut vis = loaded();
        vis.select_product(find_product("Jade Garden Vase").unwrap());
        vis.place_at(120.0, 340.0);
        let sheet = vis.placement_sheet().unwrap();

        vis.reset();
        assert!(vis.placed_items().is_empty());

        vis.restore_placements(sheet.clone()).unwrap();
        assert_eq!(vis.placed_items(), sheet.placed_items.as_slice());
        assert_eq!(vis.canvas().unwrap().get_pixel(120, 300), &JADE);
    }

    #[test]
    fn test_restore_requires_photo() {
        let mut vis = loaded();
        let sheet = vis.placement_sheet().unwrap();
        vis.new_image();
        assert!(matches!(
            vis.restore_placements(sheet),
            Err(VisualizerError::NoActivePhoto)
        ));
        assert!(vis.placement_sheet().is_err());
    }

    #[test]
    fn test_restore_rejects_oversized_item() {
        let mut vis = loaded();
        vis.select_product(find_product("Jade Garden Vase").unwrap());
        vis.place_at(120.0, 340.0);
        let before = vis.placed_items().to_vec();
        let revision = vis.revision();

        let mut sheet = vis.placement_sheet().unwrap();
        sheet.placed_items[0].width = 1.0e6;
        sheet.placed_items[0].height = 1.0e6;

        assert!(matches!(
            vis.restore_placements(sheet),
            Err(VisualizerError::InvalidPlacement(_))
        ));
        assert_eq!(vis.placed_items(), before.as_slice());
        assert_eq!(vis.revision(), revision);
    }

    #[test]
    fn test_restore_rejects_bad_numbers() {
        let mut vis = loaded();
        let product = find_product("Kyoto Ceramic Planter").unwrap();
        let good = PlacedItem::new(&product, 100.0, 300.0, 150.0, 200.0);

        let bad_items = [
            PlacedItem { x: f32::NAN, ..good.clone() },
            PlacedItem { y: f32::INFINITY, ..good.clone() },
            PlacedItem { width: 0.0, ..good.clone() },
            PlacedItem { height: -5.0, ..good.clone() },
        ];
        for bad in bad_items {
            let mut sheet = vis.placement_sheet().unwrap();
            sheet.placed_items = vec![good.clone(), bad];
            assert!(vis.restore_placements(sheet).is_err());
            assert!(vis.placed_items().is_empty());
        }
    }

    #[test]
    fn test_drop_matches_click_then_place() {
        let jade = find_product("Jade Garden Vase").unwrap();

        // Card clicked (or tapped), then canvas clicked (or tapped)
        let mut clicked = loaded();
        clicked.select_product(jade.clone());
        clicked.place_at(120.0, 340.0);

        // Card dragged onto the canvas
        let mut dropped = loaded();
        dropped.drop_product(jade, 120.0, 340.0);

        assert_eq!(clicked.placed_items(), dropped.placed_items());
        assert_eq!(clicked.canvas(), dropped.canvas());
        assert!(dropped.pending_selection().is_none());
        assert_eq!(dropped.shell().highlighted(), None);
    }

    #[test]
    fn test_drop_without_photo_is_noop() {
        let mut vis = visualizer();
        let jade = find_product("Jade Garden Vase").unwrap();
        assert!(vis.drop_product(jade, 120.0, 340.0).is_none());
        assert!(vis.placed_items().is_empty());
        assert!(vis.shell_mut().take_alert().is_none());
    }
}
