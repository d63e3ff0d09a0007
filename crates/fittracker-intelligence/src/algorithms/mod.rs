// ABOUTME: Body metric algorithms derived from a validated profile
// ABOUTME: Calendar age and body-mass-index with category thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Calendar age in whole years
pub mod age;
/// Body-mass-index and category
pub mod bmi;

pub use age::age_on;
pub use bmi::{calculate_bmi, BmiCategory};
