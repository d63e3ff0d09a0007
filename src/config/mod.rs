// ABOUTME: Configuration management module for account store and plan generator settings
// ABOUTME: Loads environment configuration once at startup and validates it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for `FitTracker`
//!
//! - **Environment**: Account store, plan generator, and deployment settings
//!   read from environment variables (and a `.env` file when present)

/// Environment and deployment configuration
pub mod environment;

pub use environment::{AppConfig, Environment, GeminiConfig, SupabaseConfig};
