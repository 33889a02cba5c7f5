// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Placed product data structures.
//!
//! A placement ties a product image to a point on the uploaded photo.
//! Coordinates are canvas pixels, not normalized.

use super::product::Product;
use crate::util::geometry::{anchor_bottom_centre, Rect};
use serde::{Deserialize, Serialize};

/// A product placed on the photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub image_url: String,
    pub name: String,
}

impl PlacedItem {
    /// Place `product` at `(x, y)` with the given drawn size.
    pub fn new(product: &Product, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            image_url: product.image_url.clone(),
            name: product.name.clone(),
        }
    }

    /// Rectangle the product is drawn into. The vase stands on its point.
    pub fn bounds(&self) -> Rect {
        anchor_bottom_centre(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::find_product;

    #[test]
    fn test_new_copies_product_identity() {
        let product = find_product("Scandi White Collection").unwrap();
        let item = PlacedItem::new(&product, 10.0, 20.0, 150.0, 200.0);
        assert_eq!(item.name, "Scandi White Collection");
        assert_eq!(item.image_url, "/images/product-2.jpg");
    }

    #[test]
    fn test_bounds_stand_on_point() {
        let product = find_product("Jade Garden Vase").unwrap();
        let item = PlacedItem::new(&product, 120.0, 340.0, 150.0, 200.0);
        let rect = item.bounds();
        assert_eq!(rect.x, 45.0);
        assert_eq!(rect.y, 140.0);
        assert_eq!(rect.width, 150.0);
        assert_eq!(rect.height, 200.0);
    }
}
