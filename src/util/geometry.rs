// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides photo scaling, placement anchoring and the
//! mapping between on-screen display coordinates and canvas pixels.

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scale `width` x `height` down to fit within `max_width` x `max_height`,
/// preserving aspect ratio. Images that already fit are left unchanged.
///
/// The width bound is applied first, then the height bound.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let mut w = width as f64;
    let mut h = height as f64;

    if w > max_width as f64 {
        h = h * max_width as f64 / w;
        w = max_width as f64;
    }
    if h > max_height as f64 {
        w = w * max_height as f64 / h;
        h = max_height as f64;
    }

    ((w as u32).max(1), (h as u32).max(1))
}

/// Rectangle of size `width` x `height` whose bottom edge is centred on `(x, y)`.
pub fn anchor_bottom_centre(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect {
        x: x - width / 2.0,
        y: y - height,
        width,
        height,
    }
}

/// Largest size with the image's aspect ratio that fits the available area.
pub fn fit_display_size(
    image_width: u32,
    image_height: u32,
    available_width: f32,
    available_height: f32,
) -> (f32, f32) {
    let img_aspect = image_width as f32 / image_height as f32;
    let available_aspect = available_width / available_height;

    if img_aspect > available_aspect {
        // Image is wider - fit to width
        (available_width, available_width / img_aspect)
    } else {
        // Image is taller - fit to height
        (available_height * img_aspect, available_height)
    }
}

/// Convert an offset inside the displayed canvas to canvas pixel coordinates.
pub fn display_to_canvas(
    offset_x: f32,
    offset_y: f32,
    display_width: f32,
    display_height: f32,
    canvas_width: u32,
    canvas_height: u32,
) -> (f32, f32) {
    (
        offset_x / display_width * canvas_width as f32,
        offset_y / display_height * canvas_height as f32,
    )
}
