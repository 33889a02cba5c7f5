// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Controls bar shown while a photo is loaded.

/// Result of controls bar interaction.
pub enum ControlsAction {
    None,
    Reset,
    Download,
    NewImage,
}

/// Display the controls bar.
pub fn show(ui: &mut egui::Ui, placed_count: usize) -> ControlsAction {
    let mut action = ControlsAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("⟲ Reset").clicked() {
            action = ControlsAction::Reset;
        }
        if ui.button("⬇ Download").clicked() {
            action = ControlsAction::Download;
        }
        if ui.button("🖼 New Image").clicked() {
            action = ControlsAction::NewImage;
        }

        ui.separator();

        let text = match placed_count {
            0 => "No vases placed yet".to_string(),
            1 => "1 vase placed".to_string(),
            n => format!("{} vases placed", n),
        };
        ui.label(egui::RichText::new(text).italics().weak());
    });

    action
}
