// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: catalog products, placements and the photo session.

pub mod placement;
pub mod product;
pub mod session;
