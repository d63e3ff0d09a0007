// ABOUTME: Application constants for FitTracker: environment variable names and service ids
// ABOUTME: Re-exports the domain constants from fittracker-core for single-path access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Environment variable names, service identifiers, and account store
//! endpoints. Domain constants (validation bounds, wizard limits, plan
//! defaults) live in `fittracker_core::constants` and are re-exported here.

pub use fittracker_core::constants::{goal, plan, profile, units};

/// Service identifiers used in logs
pub mod service_names {
    /// Service name reported at startup
    pub const FITTRACKER: &str = "fittracker";
    /// Plan generator service label
    pub const GEMINI: &str = "Gemini";
    /// Account store service label
    pub const SUPABASE: &str = "Supabase";
}

/// Environment variable names
pub mod env_vars {
    /// Account store project URL
    pub const SUPABASE_URL: &str = "SUPABASE_URL";
    /// Account store public (anon) key
    pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
    /// Plan generator API key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Plan generator model override
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Where federated sign-in returns to
    pub const OAUTH_REDIRECT_URL: &str = "FITTRACKER_OAUTH_REDIRECT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Account store REST layout
pub mod supabase {
    /// Auth API prefix
    pub const AUTH_PATH: &str = "/auth/v1";
    /// Row API prefix
    pub const REST_PATH: &str = "/rest/v1";
    /// Profile table name
    pub const PROFILES_TABLE: &str = "profiles";
    /// Row store error code for "no rows returned"
    pub const NO_ROWS_CODE: &str = "PGRST116";
    /// Default return address for federated sign-in
    pub const DEFAULT_OAUTH_REDIRECT: &str = "http://localhost:5173";
}

/// Capacity of the session-change broadcast channel
pub const AUTH_EVENT_CHANNEL_CAPACITY: usize = 16;
