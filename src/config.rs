// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Visualizer settings.
//!
//! Settings are read from a YAML file named by `MIDORI_VISUALIZER_CONFIG`.
//! Any field left out of the file keeps its default value.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the path of the settings file.
pub const CONFIG_ENV_VAR: &str = "MIDORI_VISUALIZER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Bounding box an uploaded photo is scaled down into
    pub max_canvas_width: u32,
    pub max_canvas_height: u32,

    /// Size of a placed product on the canvas
    pub item_width: f32,
    pub item_height: f32,

    /// Number of products shown in the recommendations panel
    pub recommendation_count: usize,

    /// Fixed seed for the placeholder recommender, for repeatable demos
    pub recommendation_seed: Option<u64>,

    /// File name offered when saving the composited image
    pub export_file_name: String,

    /// Directory product image paths are resolved against
    pub asset_root: PathBuf,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            max_canvas_width: 1000,
            max_canvas_height: 700,
            item_width: 150.0,
            item_height: 200.0,
            recommendation_count: 4,
            recommendation_seed: None,
            export_file_name: "midori-gardens-visualization.png".to_string(),
            asset_root: PathBuf::from("assets"),
        }
    }
}

impl VisualizerConfig {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load settings from the file named by `MIDORI_VISUALIZER_CONFIG`, or defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let config = Self::load(Path::new(&path))?;
                log::info!("Loaded config from {}", Path::new(&path).display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
