// ABOUTME: Unit conversion constants for body measurements
// ABOUTME: Imperial to metric factors used to normalize weight and height
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Kilograms per pound (exact by definition)
pub const KG_PER_LB: f64 = 0.453_592_37;

/// Centimeters per foot (exact by definition)
pub const CM_PER_FOOT: f64 = 30.48;

/// Centimeters per meter
pub const CM_PER_METER: f64 = 100.0;
