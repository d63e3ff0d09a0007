// ABOUTME: Domain service layer sitting between the contexts and the command-line front end
// ABOUTME: Plan generation pipeline and dashboard summary values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services combine the pure intelligence crate with the external clients.
//! They hold no global state and are constructed by the caller.

/// Dashboard greeting values
pub mod dashboard;

/// Goal submission to validated plan
pub mod plan_generation;

pub use dashboard::DashboardSummary;
pub use plan_generation::PlanGenerationService;
