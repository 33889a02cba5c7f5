// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo canvas and upload area.
//!
//! This module shows the composited photo, turns clicks, taps and product
//! drops into canvas coordinates, and draws the upload prompt when no
//! photo is loaded.

use crate::models::product::Product;
use crate::util::geometry::{display_to_canvas, fit_display_size};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Click or tap at a canvas point
    PlaceAt(f32, f32),
    /// Product card dropped at a canvas point
    DropProduct(Product, f32, f32),
}

/// Result of upload area interaction.
pub enum UploadAction {
    None,
    Browse,
}

/// Display the composited canvas and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    texture: &Option<egui::TextureHandle>,
    canvas_size: Option<(u32, u32)>,
    has_pending_selection: bool,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(texture), Some((canvas_width, canvas_height))) = (texture, canvas_size) else {
            return;
        };

        let available = ui.available_size();
        let (display_width, display_height) =
            fit_display_size(canvas_width, canvas_height, available.x, available.y);

        // Center the canvas
        let x_offset = (available.x - display_width) / 2.0;
        let y_offset = (available.y - display_height) / 2.0;

        let image_rect = egui::Rect::from_min_size(
            ui.min_rect().min + egui::vec2(x_offset, y_offset),
            egui::vec2(display_width, display_height),
        );

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let response = ui.allocate_rect(image_rect, egui::Sense::click());
        let to_canvas = |pos: egui::Pos2| {
            display_to_canvas(
                pos.x - image_rect.min.x,
                pos.y - image_rect.min.y,
                display_width,
                display_height,
                canvas_width,
                canvas_height,
            )
        };

        // Product card dragged in from the recommendations panel
        if let Some(product) = response.dnd_release_payload::<Product>() {
            if let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
                if image_rect.contains(pos) {
                    let (x, y) = to_canvas(pos);
                    action = CanvasAction::DropProduct((*product).clone(), x, y);
                }
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if image_rect.contains(pos) {
                    let (x, y) = to_canvas(pos);
                    action = CanvasAction::PlaceAt(x, y);
                }
            }
        }

        let dragging_product = egui::DragAndDrop::has_payload_of_type::<Product>(ui.ctx());
        if has_pending_selection || dragging_product {
            response.on_hover_cursor(egui::CursorIcon::Crosshair);
        }
    });

    action
}

/// Display the upload prompt shown while no photo is loaded.
pub fn show_upload_area(ui: &mut egui::Ui, hovering_files: bool) -> UploadAction {
    let mut action = UploadAction::None;
    let available_size = ui.available_size();

    let fill = if hovering_files {
        egui::Color32::from_rgb(52, 68, 56)
    } else {
        egui::Color32::from_gray(40)
    };

    let frame = egui::Frame::canvas(ui.style()).fill(fill).show(ui, |ui| {
        ui.set_min_size(available_size);
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading(
                    egui::RichText::new("Midori Gardens")
                        .size(32.0)
                        .color(egui::Color32::from_gray(200)),
                );
                ui.label(
                    egui::RichText::new("See our vases in your space")
                        .size(14.0)
                        .color(egui::Color32::from_gray(150)),
                );
                ui.add_space(20.0);
                if ui.button("Upload Photo").clicked() {
                    action = UploadAction::Browse;
                }
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new("or drop a JPG, PNG or WebP image here")
                        .weak()
                        .color(egui::Color32::from_gray(130)),
                );
            });
        });
    });

    // The whole area is clickable, not just the button
    let area = ui.interact(
        frame.response.rect,
        ui.id().with("upload_area"),
        egui::Sense::click(),
    );
    if area.clicked() {
        action = UploadAction::Browse;
    }

    action
}
