// ABOUTME: Core types and constants for the FitTracker goal intake pipeline
// ABOUTME: Foundation crate with error handling, domain models, and validation bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FitTracker` Core
//!
//! Foundation crate providing shared types and constants for the `FitTracker`
//! onboarding and plan-generation pipeline. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Validation bounds, option catalogs, and user-facing messages
//! - **models**: Profile, goal, plan, and account records

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Profile, `GoalDraft`, `PlanResult`, Session, etc.)
pub mod models;
