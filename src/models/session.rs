// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo session state.
//!
//! A session starts when a photo is loaded and ends when the user asks
//! for a new image. Placements never outlive the photo they were made on.

use super::{placement::PlacedItem, product::Product};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// A decoded photo, already scaled to canvas size.
#[derive(Debug, Clone)]
pub struct Photo {
    pub source_name: String,
    pub image: RgbaImage,
}

impl Photo {
    pub fn new(source_name: String, image: RgbaImage) -> Self {
        Self { source_name, image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Mutable state of the current photo session.
#[derive(Debug, Default)]
pub struct Session {
    pub uploaded_image: Option<Photo>,
    pub placed_items: Vec<PlacedItem>,
    pub pending_selection: Option<Product>,
}

impl Session {
    pub fn has_photo(&self) -> bool {
        self.uploaded_image.is_some()
    }

    /// Start a fresh session on `photo`.
    pub fn install_photo(&mut self, photo: Photo) {
        self.uploaded_image = Some(photo);
        self.placed_items.clear();
        self.pending_selection = None;
    }

    /// Drop the photo and everything placed on it.
    pub fn clear(&mut self) {
        self.uploaded_image = None;
        self.placed_items.clear();
        self.pending_selection = None;
    }
}

/// Placements of a session, in a form that can be saved and loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSheet {
    pub photo_name: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub placed_items: Vec<PlacedItem>,
}

impl PlacementSheet {
    /// Snapshot the placements of `session`, if a photo is loaded.
    pub fn from_session(session: &Session) -> Option<Self> {
        let photo = session.uploaded_image.as_ref()?;
        Some(Self {
            photo_name: photo.source_name.clone(),
            canvas_width: photo.width(),
            canvas_height: photo.height(),
            placed_items: session.placed_items.clone(),
        })
    }
}
