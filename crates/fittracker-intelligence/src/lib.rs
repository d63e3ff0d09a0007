// ABOUTME: Goal intake intelligence crate for the FitTracker onboarding pipeline
// ABOUTME: Validates profiles, drives the goal wizard, compiles prompts, and parses plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FitTracker` Intelligence
//!
//! Everything in this crate is synchronous and free of I/O. Callers inject the
//! current date where a result depends on it, so every operation is
//! reproducible in tests.
//!
//! Pipeline order:
//!
//! 1. [`profile_validation`] turns raw onboarding fields into a `Profile`
//! 2. [`goal_wizard`] accumulates answers and finalizes a `GoalSubmission`
//! 3. [`prompt`] renders the pair into a prompt with derived metrics
//! 4. [`plan_parser`] extracts the plan from the generator's reply

/// Age and body-mass-index calculations
pub mod algorithms;
/// Goal intake state machine
pub mod goal_wizard;
/// Model reply to plan extraction
pub mod plan_parser;
/// Onboarding form validation
pub mod profile_validation;
/// Deterministic prompt rendering
pub mod prompt;

pub use algorithms::{age_on, calculate_bmi, BmiCategory};
pub use goal_wizard::{GoalWizard, Transition, WizardState, WizardStep};
pub use plan_parser::{extract_json_object, parse_plan_response};
pub use profile_validation::{
    validate_body, validate_identity, validate_profile, ProfileForm, ProfileInput, ProfileStep,
};
pub use prompt::{compile_plan_request, compile_prompt, compile_prompt_today};
