// ABOUTME: Application error surface re-exported from fittracker-core
// ABOUTME: Adds conversions for HTTP client failures raised by the network clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Error types are defined in `fittracker_core::errors` so the intelligence
//! crate and this crate share one vocabulary. This module re-exports them and
//! adds the `reqwest` conversions only the network clients need.

pub use fittracker_core::errors::*;

/// Map a transport failure to an account store auth error
#[must_use]
pub fn auth_transport_error(error: &reqwest::Error) -> AuthError {
    if error.is_decode() {
        AuthError::InvalidResponse {
            message: error.to_string(),
        }
    } else {
        AuthError::Network {
            message: error.to_string(),
        }
    }
}

/// Map a transport failure to a profile store error
#[must_use]
pub fn profile_transport_error(error: &reqwest::Error) -> ProfileStoreError {
    if error.is_decode() {
        ProfileStoreError::InvalidResponse {
            message: error.to_string(),
        }
    } else {
        ProfileStoreError::Network {
            message: error.to_string(),
        }
    }
}

/// Map a transport failure to an application error for the plan generator
#[must_use]
pub fn generator_transport_error(service: &str, error: &reqwest::Error) -> AppError {
    AppError::new(
        ErrorCode::ExternalServiceUnavailable,
        format!("{service}: request failed: {error}"),
    )
}
