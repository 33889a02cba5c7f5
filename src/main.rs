// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Midori Gardens Vase Visualizer
//!
//! A desktop tool for trying the shop's vases in a photo of your own
//! room: upload a photo, pick a recommended product and place it.

mod app;
mod config;
mod error;
mod io;
mod models;
mod recommend;
mod render;
mod shell;
mod ui;
mod util;
mod visualizer;

use anyhow::Result;
use app::VisualizerApp;
use config::VisualizerConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = VisualizerConfig::from_env()?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true)
            .with_title("Midori Gardens - Vase Visualizer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Midori Visualizer",
        options,
        Box::new(|_cc| Ok(Box::new(VisualizerApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
