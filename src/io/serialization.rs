// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Placement sheet and composited image export.
//!
//! Placement sheets are written and read as YAML or JSON, chosen by file
//! extension. The composited canvas is exported as PNG.

use crate::error::{VisualizerError, VisualizerResult};
use crate::models::session::PlacementSheet;
use anyhow::{bail, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Export a placement sheet to YAML format.
pub fn export_yaml(sheet: &PlacementSheet, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(sheet)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a placement sheet to JSON format.
pub fn export_json(sheet: &PlacementSheet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(sheet)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a placement sheet from YAML format.
pub fn import_yaml(path: &Path) -> Result<PlacementSheet> {
    let yaml = std::fs::read_to_string(path)?;
    let sheet = serde_yaml::from_str(&yaml)?;
    Ok(sheet)
}

/// Import a placement sheet from JSON format.
pub fn import_json(path: &Path) -> Result<PlacementSheet> {
    let json = std::fs::read_to_string(path)?;
    let sheet = serde_json::from_str(&json)?;
    Ok(sheet)
}

/// Export a placement sheet, picking the format from the file extension.
pub fn export_sheet(sheet: &PlacementSheet, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(sheet, path),
        Some("json") => export_json(sheet, path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}

/// Import a placement sheet, picking the format from the file extension.
pub fn import_sheet(path: &Path) -> Result<PlacementSheet> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}

/// Encode a canvas as PNG bytes.
pub fn encode_png(canvas: &RgbaImage) -> VisualizerResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas.clone())
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| VisualizerError::encode(format!("Failed to encode PNG: {}", e)))?;
    Ok(buffer.into_inner())
}

/// Write PNG bytes to disk.
pub fn save_png(bytes: &[u8], path: &Path) -> Result<()> {
    std::fs::write(path, bytes)?;
    Ok(())
}
