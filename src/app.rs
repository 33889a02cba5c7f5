// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the visualizer core to the window: it polls the
//! background photo loader, forwards menu, panel and canvas actions to
//! [`Visualizer`], and renders the regions the shell marks visible.

use crate::config::VisualizerConfig;
use crate::error::VisualizerResult;
use crate::io::{
    media::{decode_upload, mime_type_for_path, ImageFile},
    serialization,
    thumbnails::AssetDirectory,
};
use crate::models::session::Photo;
use crate::recommend::MockRecommender;
use crate::shell::{PresentationShell, Region, ShellState};
use crate::ui::{canvas, controls, recommendations};
use crate::visualizer::Visualizer;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Main application state.
pub struct VisualizerApp {
    /// Session state and operations
    visualizer: Visualizer<ShellState>,

    /// Texture holding the composited canvas
    canvas_texture: Option<egui::TextureHandle>,

    /// Visualizer revision the texture was built from
    texture_revision: Option<u64>,

    /// Receiver for background photo decoding
    image_loader: Option<Receiver<VisualizerResult<Photo>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Alert currently shown to the user
    active_alert: Option<String>,
}

impl Default for VisualizerApp {
    fn default() -> Self {
        Self::new(VisualizerConfig::default())
    }
}

impl VisualizerApp {
    /// Create a new visualizer application instance.
    pub fn new(config: VisualizerConfig) -> Self {
        let thumbnails = AssetDirectory::new(config.asset_root.clone());
        let recommender = match config.recommendation_seed {
            Some(seed) => MockRecommender::seeded(seed),
            None => MockRecommender::from_os_rng(),
        };
        let visualizer = Visualizer::new(
            config,
            ShellState::new(),
            Box::new(recommender),
            Box::new(thumbnails),
        );

        Self {
            visualizer,
            canvas_texture: None,
            texture_revision: None,
            image_loader: None,
            loading_message: None,
            active_alert: None,
        }
    }

    /// Load a photo from disk (asynchronously).
    pub fn load_image_file(&mut self, path: PathBuf) {
        self.spawn_loader(move || ImageFile::read(&path));
    }

    /// Load a photo dropped onto the window.
    fn load_dropped_file(&mut self, file: egui::DroppedFile) {
        if let Some(path) = file.path {
            self.load_image_file(path);
        } else if let Some(bytes) = file.bytes {
            let mime_type = if file.mime.is_empty() {
                mime_type_for_path(std::path::Path::new(&file.name))
            } else {
                file.mime.clone()
            };
            let image_file = ImageFile::new(file.name, mime_type, bytes.to_vec());
            self.spawn_loader(move || Ok(image_file));
        }
    }

    /// Decode an upload on a background thread.
    fn spawn_loader<F>(&mut self, read: F)
    where
        F: FnOnce() -> VisualizerResult<ImageFile> + Send + 'static,
    {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        let max_width = self.visualizer.config().max_canvas_width;
        let max_height = self.visualizer.config().max_canvas_height;

        std::thread::spawn(move || {
            let result = read().and_then(|file| {
                log::info!("Loading image: {} ({})", file.name, file.mime_type);
                decode_upload(&file, max_width, max_height)
            });
            let _ = sender.send(result);
        });
    }

    /// Save the composited image as PNG.
    fn download(&mut self) {
        let bytes = match self.visualizer.export_png() {
            Ok(bytes) => bytes,
            Err(e) => {
                self.visualizer.report_error(&e);
                return;
            }
        };

        let file_name = self.visualizer.config().export_file_name.clone();
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(file_name)
            .save_file()
        {
            match serialization::save_png(&bytes, &path) {
                Ok(_) => log::info!("Saved visualization to {}", path.display()),
                Err(e) => self.alert(format!("Failed to save visualization: {}", e)),
            }
        }
    }

    /// Export placements to a file.
    fn export_placements(&mut self, path: PathBuf) {
        let sheet = match self.visualizer.placement_sheet() {
            Ok(sheet) => sheet,
            Err(e) => {
                self.visualizer.report_error(&e);
                return;
            }
        };

        match serialization::export_sheet(&sheet, &path) {
            Ok(_) => log::info!("Exported placements to {}", path.display()),
            Err(e) => self.alert(format!("Failed to export placements: {}", e)),
        }
    }

    /// Import placements from a file onto the current photo.
    fn import_placements(&mut self, path: PathBuf) {
        let sheet = match serialization::import_sheet(&path) {
            Ok(sheet) => sheet,
            Err(e) => {
                self.alert(format!("Failed to import placements: {}", e));
                return;
            }
        };

        if let Err(e) = self.visualizer.restore_placements(sheet) {
            self.visualizer.report_error(&e);
        }
    }

    /// Log a failure at the application edge and show it to the user.
    fn alert(&mut self, message: String) {
        log::error!("{}", message);
        self.visualizer.shell_mut().alert(&message);
    }

    /// Rebuild the canvas texture if the visualizer redrew since last frame.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let revision = self.visualizer.revision();
        if self.texture_revision == Some(revision) {
            return;
        }
        self.texture_revision = Some(revision);

        self.canvas_texture = self.visualizer.canvas().map(|canvas| {
            let size = [canvas.width() as usize, canvas.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, canvas.as_raw());
            ctx.load_texture("visualizer_canvas", color_image, egui::TextureOptions::LINEAR)
        });
    }

    fn canvas_size(&self) -> Option<(u32, u32)> {
        self.visualizer.canvas().map(|canvas| canvas.dimensions())
    }
}

impl eframe::App for VisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed photo loading
        if let Some(ref receiver) = self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;
                self.loading_message = None;

                match result {
                    Ok(photo) => self.visualizer.install_photo(photo),
                    Err(e) => self.visualizer.report_error(&e),
                }
            }
        }

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Files dropped onto the window while the upload area is showing
        let hovering_files = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        if let Some(file) = dropped {
            if self.visualizer.shell().is_visible(Region::UploadArea) {
                self.load_dropped_file(file);
            }
        }

        self.sync_texture(ctx);

        if self.active_alert.is_none() {
            self.active_alert = self.visualizer.shell_mut().take_alert();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "webp", "bmp", "gif"])
                            .pick_file()
                        {
                            self.load_image_file(path);
                        }
                        ui.close_menu();
                    }
                    let has_photo = self.visualizer.session().has_photo();
                    if ui
                        .add_enabled(has_photo, egui::Button::new("Save Visualization..."))
                        .clicked()
                    {
                        self.download();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(has_photo, egui::Button::new("Load Placements..."))
                        .clicked()
                    {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Placements", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_placements(path);
                        }
                        ui.close_menu();
                    }
                    ui.add_enabled_ui(has_photo, |ui| {
                        ui.menu_button("Export Placements", |ui| {
                            if ui.button("Export as YAML...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("YAML", &["yaml", "yml"])
                                    .set_file_name("placements.yaml")
                                    .save_file()
                                {
                                    self.export_placements(path);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export as JSON...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("placements.json")
                                    .save_file()
                                {
                                    self.export_placements(path);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Controls bar
        if self.visualizer.shell().is_visible(Region::Controls) {
            let placed_count = self.visualizer.placed_items().len();
            let controls_action = egui::TopBottomPanel::top("controls")
                .show(ctx, |ui| controls::show(ui, placed_count))
                .inner;

            match controls_action {
                controls::ControlsAction::Reset => self.visualizer.reset(),
                controls::ControlsAction::Download => self.download(),
                controls::ControlsAction::NewImage => self.visualizer.new_image(),
                controls::ControlsAction::None => {}
            }
        }

        // Recommendations panel (right side)
        if self.visualizer.shell().is_visible(Region::RecommendationsPanel) {
            let shell = self.visualizer.shell();
            let panel_action = egui::SidePanel::right("recommendations")
                .default_width(280.0)
                .show(ctx, |ui| {
                    recommendations::show(
                        ui,
                        self.visualizer.recommendations(),
                        shell.highlighted(),
                        shell.help_text(),
                    )
                })
                .inner;

            match panel_action {
                recommendations::RecommendationsAction::Select(product) => {
                    self.visualizer.select_product(product);
                }
                recommendations::RecommendationsAction::ClearSelection => {
                    self.visualizer.clear_selection();
                }
                recommendations::RecommendationsAction::None => {}
            }
        }

        // Escape drops the pending selection
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.visualizer.clear_selection();
        }

        // Main area (center)
        let canvas_visible = self.visualizer.shell().is_visible(Region::Canvas);
        let has_pending = self.visualizer.pending_selection().is_some();
        let canvas_size = self.canvas_size();

        let (canvas_action, upload_action) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    (canvas::CanvasAction::None, canvas::UploadAction::None)
                } else if canvas_visible {
                    let action = canvas::show(ui, &self.canvas_texture, canvas_size, has_pending);
                    (action, canvas::UploadAction::None)
                } else {
                    let action = canvas::show_upload_area(ui, hovering_files);
                    (canvas::CanvasAction::None, action)
                }
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::PlaceAt(x, y) => {
                self.visualizer.place_at(x, y);
            }
            canvas::CanvasAction::DropProduct(product, x, y) => {
                self.visualizer.drop_product(product, x, y);
            }
            canvas::CanvasAction::None => {}
        }

        if let canvas::UploadAction::Browse = upload_action {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png", "webp", "bmp", "gif"])
                .pick_file()
            {
                self.load_image_file(path);
            }
        }

        // Alert window
        if let Some(message) = self.active_alert.clone() {
            egui::Window::new("Midori Gardens")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.active_alert = None;
                    }
                });
        }
    }
}
