// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Validation bounds, option catalogs, and user-facing copy for FitTracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by the component that owns them rather than kept in a
//! single large file.

/// Goal wizard limits, step titles, and narrative snippets
pub mod goal;
/// Plan generation defaults and messages
pub mod plan;
/// Profile validation bounds and messages
pub mod profile;
/// Unit conversion factors
pub mod units;
