// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo upload loading.
//!
//! This module reads user-supplied files, rejects anything that is not an
//! image, decodes the rest and scales them down to canvas size.

use crate::error::{VisualizerError, VisualizerResult};
use crate::models::session::Photo;
use crate::util::geometry::fit_within;
use image::{imageops::FilterType, ImageFormat};
use std::path::Path;

/// A file handed to the visualizer by the user.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, inferring its MIME type from the extension.
    pub fn read(path: &Path) -> VisualizerResult<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, mime_type_for_path(path), bytes))
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Guess a MIME type from a file extension.
pub fn mime_type_for_path(path: &Path) -> String {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    match extension.as_deref() {
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("yaml") | Some("yml") => "application/yaml",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Check, decode and scale an uploaded file into a canvas-sized photo.
pub fn decode_upload(file: &ImageFile, max_width: u32, max_height: u32) -> VisualizerResult<Photo> {
    if !file.is_image() {
        return Err(VisualizerError::UnsupportedFileType {
            mime_type: file.mime_type.clone(),
        });
    }

    let img = image::load_from_memory(&file.bytes)
        .map_err(|e| VisualizerError::decode(format!("{}: {}", file.name, e)))?;
    log::info!("Decoded {} ({}x{})", file.name, img.width(), img.height());

    let (width, height) = fit_within(img.width(), img.height(), max_width, max_height);
    let img = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        log::info!("Scaled {} to {}x{}", file.name, width, height);
        img.resize_exact(width, height, FilterType::Triangle)
    };

    Ok(Photo::new(file.name.clone(), img.to_rgba8()))
}
