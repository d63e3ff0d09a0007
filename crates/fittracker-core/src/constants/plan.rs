// ABOUTME: Plan generation constants: default model and user-facing failure copy
// ABOUTME: Keeps the generator defaults in one place for the service and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Model used for plan generation unless configured otherwise
pub const DEFAULT_PLAN_MODEL: &str = "gemini-1.5-flash";

/// The single retryable message shown for any plan generation failure
pub const PLAN_FAILURE_MESSAGE: &str = "Failed to save your goal. Please try again.";

/// Shown for injuries when the user left the field empty
pub const NO_INJURIES_TEXT: &str = "None specified";
