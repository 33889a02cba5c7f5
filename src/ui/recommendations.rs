// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Recommendations panel.
//!
//! Each suggested product is a card that can be clicked (or tapped) to
//! select it, or dragged straight onto the canvas.

use crate::models::product::Product;
use crate::recommend::Recommendation;

/// Result of recommendations panel interaction.
pub enum RecommendationsAction {
    None,
    Select(Product),
    ClearSelection,
}

/// Display the recommendations panel.
pub fn show(
    ui: &mut egui::Ui,
    recommendations: &[Recommendation],
    highlighted: Option<&str>,
    help_text: &str,
) -> RecommendationsAction {
    let mut action = RecommendationsAction::None;

    ui.heading("Recommended for your space");
    ui.label(egui::RichText::new(help_text).italics().weak());
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (idx, rec) in recommendations.iter().enumerate() {
            let selected = highlighted == Some(rec.product.name.as_str());
            if card(ui, idx, rec, selected) {
                action = RecommendationsAction::Select(rec.product.clone());
            }
            ui.add_space(6.0);
        }
    });

    if highlighted.is_some() {
        ui.separator();
        if ui.button("Cancel selection").clicked() {
            action = RecommendationsAction::ClearSelection;
        }
    }

    action
}

/// Draw one product card. Returns true when it was clicked.
fn card(ui: &mut egui::Ui, idx: usize, rec: &Recommendation, selected: bool) -> bool {
    let stroke = if selected {
        egui::Stroke::new(2.0, egui::Color32::from_rgb(156, 175, 136))
    } else {
        egui::Stroke::new(2.0, egui::Color32::TRANSPARENT)
    };

    let frame = egui::Frame::group(ui.style()).stroke(stroke).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(rec.product.name.as_str()).strong());
        ui.label(
            egui::RichText::new(format!("★ {}", rec.match_label))
                .color(egui::Color32::from_rgb(212, 175, 55)),
        );
        ui.label(egui::RichText::new(rec.reason).small());
        ui.label(rec.product.price.as_str());
    });

    let response = ui.interact(
        frame.response.rect,
        ui.id().with(("recommendation", idx)),
        egui::Sense::click_and_drag(),
    );
    response.dnd_set_drag_payload(rec.product.clone());

    if response.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    }

    response.clicked()
}
