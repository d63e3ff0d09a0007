// ABOUTME: Plan pipeline error types for response parsing, schema checks, and generation
// ABOUTME: Every generation failure collapses to one retryable message for the user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Error Types
//!
//! - `PlanParseError` - tagged failure of extracting JSON from model text
//! - `PlanSchemaError` - a parsed plan lacks content the caller relies on
//! - `PlanGenerationError` - any failure of the prompt → model → plan pipeline

use super::{AppError, ErrorCode, WizardError};
use crate::constants::plan::PLAN_FAILURE_MESSAGE;

/// Failure to turn a model reply into a plan structure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanParseError {
    /// The reply contains no `{ ... }` span
    #[error("model response contains no JSON object")]
    NoJsonFound,
    /// A `{ ... }` span exists but is not valid plan JSON
    #[error("model response contains malformed JSON: {message}")]
    MalformedJson {
        /// Parser diagnostic
        message: String,
    },
}

/// A parsed plan is missing required content
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("plan is missing required content: {}", .violations.join(", "))]
pub struct PlanSchemaError {
    /// One entry per violated requirement
    pub violations: Vec<String>,
}

/// Failure of the plan generation pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanGenerationError {
    /// The plan generator has no credentials configured
    #[error("plan generator not configured: {message}")]
    NotConfigured {
        /// What is missing
        message: String,
    },
    /// No signed-in user or no stored profile
    #[error("User profile not found")]
    MissingProfile,
    /// A submission is already in flight
    #[error("a plan request is already in progress")]
    AlreadySubmitting,
    /// The goal draft could not be finalized
    #[error(transparent)]
    Incomplete(#[from] WizardError),
    /// The plan generator could not be reached
    #[error("plan generator unreachable: {message}")]
    Network {
        /// Transport failure details
        message: String,
    },
    /// The plan generator answered with a non-success status
    #[error("plan generator returned {status}: {message}")]
    Api {
        /// HTTP status
        status: u16,
        /// Error message from the generator
        message: String,
    },
    /// The plan generator throttled the request
    #[error("plan generator rate limited: {message}")]
    RateLimited {
        /// Quota or retry hint
        message: String,
    },
    /// The reply could not be parsed
    #[error(transparent)]
    Parse(#[from] PlanParseError),
    /// The parsed plan failed the schema check
    #[error(transparent)]
    Schema(#[from] PlanSchemaError),
}

impl PlanGenerationError {
    /// Message shown to the user; diagnostic detail stays in the logs
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        PLAN_FAILURE_MESSAGE
    }

    /// Stable error code for this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotConfigured { .. } => ErrorCode::ConfigMissing,
            Self::MissingProfile => ErrorCode::ResourceNotFound,
            Self::AlreadySubmitting => ErrorCode::ResourceLocked,
            Self::Incomplete(_) => ErrorCode::MissingRequiredField,
            Self::Network { .. } => ErrorCode::ExternalServiceUnavailable,
            Self::Api { .. } => ErrorCode::ExternalServiceError,
            Self::RateLimited { .. } => ErrorCode::ExternalRateLimited,
            Self::Parse(_) | Self::Schema(_) => ErrorCode::InvalidFormat,
        }
    }
}

impl From<PlanGenerationError> for AppError {
    fn from(error: PlanGenerationError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}
