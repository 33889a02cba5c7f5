// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Product recommendations for an uploaded photo.
//!
//! No image analysis happens here. [`MockRecommender`] is a placeholder
//! policy: it picks catalog products at random and attaches fixed,
//! cosmetic match labels and reasons. Anything smarter slots in behind
//! [`RecommendationPolicy`].

use crate::models::product::Product;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Cosmetic match labels, best first.
pub const MATCH_LABELS: [&str; 4] = ["96% match", "94% match", "91% match", "88% match"];

/// Cosmetic reasons, paired with [`MATCH_LABELS`] by position.
pub const REASONS: [&str; 4] = [
    "Complements warm lighting and neutral tones in your space",
    "Matches the modern aesthetic and clean lines visible",
    "Perfect size and color harmony with existing decor",
    "Adds visual interest while maintaining cohesive style",
];

/// A catalog product surfaced to the user with a cosmetic score.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub product: Product,
    pub match_label: &'static str,
    pub reason: &'static str,
}

/// Chooses which products to suggest for a photo.
pub trait RecommendationPolicy {
    fn recommend(&mut self, catalog: &[Product], count: usize) -> Vec<Recommendation>;
}

/// Random placeholder policy.
pub struct MockRecommender<R: Rng> {
    rng: R,
}

impl MockRecommender<StdRng> {
    /// Recommender seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Recommender with reproducible picks.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MockRecommender<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RecommendationPolicy for MockRecommender<R> {
    /// Pick up to `count` distinct products. At most four are returned,
    /// one per cosmetic label.
    fn recommend(&mut self, catalog: &[Product], count: usize) -> Vec<Recommendation> {
        let mut picks = catalog.to_vec();
        picks.shuffle(&mut self.rng);

        picks
            .into_iter()
            .zip(MATCH_LABELS.into_iter().zip(REASONS))
            .take(count)
            .map(|(product, (match_label, reason))| Recommendation {
                product,
                match_label,
                reason,
            })
            .collect()
    }
}
