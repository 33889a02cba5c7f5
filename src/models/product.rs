// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Product catalog.
//!
//! The catalog is a fixed list of the shop's vases and planters. It is
//! only ever read at runtime.

use serde::{Deserialize, Serialize};

/// A product that can be placed onto a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub image_url: String,
    pub price: String,
    pub style: String,
    pub color: String,
}

impl Product {
    pub fn new(name: &str, image_url: &str, price: &str, style: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            image_url: image_url.to_string(),
            price: price.to_string(),
            style: style.to_string(),
            color: color.to_string(),
        }
    }
}

/// The static product catalog.
pub fn catalog() -> Vec<Product> {
    vec![
        Product::new(
            "Kyoto Ceramic Planter",
            "/images/product-1.jpg",
            "₹3,499",
            "modern minimalist",
            "neutral white beige",
        ),
        Product::new(
            "Mediterranean Terracotta",
            "/images/product-3.jpg",
            "₹1,899",
            "rustic traditional",
            "warm terracotta",
        ),
        Product::new(
            "Scandi White Collection",
            "/images/product-2.jpg",
            "₹2,799",
            "scandinavian modern",
            "pure white",
        ),
        Product::new(
            "Jade Garden Vase",
            "/images/product-5.jpg",
            "₹5,499",
            "artisan luxury",
            "sage green",
        ),
        Product::new(
            "Architectural Series",
            "/images/product-4.jpg",
            "₹4,999",
            "contemporary bold",
            "charcoal gray",
        ),
        Product::new(
            "Hanging Garden Set",
            "/images/product-6.jpg",
            "₹3,299",
            "bohemian eclectic",
            "mixed earth tones",
        ),
    ]
}

/// Look up a catalog product by name.
pub fn find_product(name: &str) -> Option<Product> {
    catalog().into_iter().find(|p| p.name == name)
}
