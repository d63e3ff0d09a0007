// ABOUTME: Extracts the embedded JSON plan from free-form generator text
// ABOUTME: Greedy first-brace to last-brace span, returning a tagged parse result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Response Parser
//!
//! Generators wrap JSON in prose or code fences. The parser takes the span
//! from the first `{` to the last `}`, checks it is JSON, then decodes it
//! leniently into a plan. Shape checks are a separate step
//! (`PlanResult::validate`).

use fittracker_core::errors::PlanParseError;
use fittracker_core::models::PlanResult;
use serde_json::Value;
use tracing::debug;

/// Span from the first `{` through the last `}`, if both exist in that order
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse a generator reply into a plan
///
/// # Errors
///
/// - [`PlanParseError::NoJsonFound`] when the text holds no `{ ... }` span
/// - [`PlanParseError::MalformedJson`] when the span is not valid JSON
pub fn parse_plan_response(text: &str) -> Result<PlanResult, PlanParseError> {
    let Some(candidate) = extract_json_object(text) else {
        debug!(response_len = text.len(), "no JSON object in plan response");
        return Err(PlanParseError::NoJsonFound);
    };
    let value: Value = serde_json::from_str(candidate).map_err(|error| {
        debug!(error = %error, "plan response JSON did not parse");
        malformed(&error)
    })?;
    serde_json::from_value(value).map_err(|error| malformed(&error))
}

fn malformed(error: &serde_json::Error) -> PlanParseError {
    PlanParseError::MalformedJson {
        message: error.to_string(),
    }
}
