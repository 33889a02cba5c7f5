// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the visualizer core.

use thiserror::Error;

pub type VisualizerResult<T> = Result<T, VisualizerError>;

#[derive(Debug, Error)]
pub enum VisualizerError {
    #[error("unsupported file type: {mime_type}")]
    UnsupportedFileType { mime_type: String },

    #[error("failed to decode image: {0}")]
    DecodeFailure(String),

    #[error("no photo loaded")]
    NoActivePhoto,

    #[error("no product selected")]
    NoPendingSelection,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("invalid placement: {0}")]
    InvalidPlacement(String),
}

impl VisualizerError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Placement prerequisites that are missing on an ordinary idle click.
    pub fn is_idle_click(&self) -> bool {
        matches!(self, Self::NoActivePhoto | Self::NoPendingSelection)
    }

    /// Text shown to the user in an alert.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedFileType { .. } => {
                "Please upload an image file (JPG, PNG, etc.)".to_string()
            }
            Self::DecodeFailure(_) => {
                "Error loading image. Please try a different image.".to_string()
            }
            Self::Io(_) => "Error reading file. Please try again.".to_string(),
            Self::NoActivePhoto => "Upload a photo first.".to_string(),
            Self::NoPendingSelection => "Select a vase first.".to_string(),
            Self::Encode(msg) => msg.clone(),
            Self::InvalidPlacement(msg) => format!("Could not load placements: {}", msg),
        }
    }
}
