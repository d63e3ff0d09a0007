// ABOUTME: Core data models for onboarding profiles, goal drafts, plans, and sessions
// ABOUTME: Typed records shared by the intelligence crate and the application crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Records flow through the pipeline in this order: a [`Profile`] is validated
//! at onboarding, a [`GoalDraft`] is accumulated by the wizard and finalized
//! into a [`GoalSubmission`], the pair becomes a [`PlanRequest`], and the model
//! reply is parsed into a [`PlanResult`].

/// Session, identity, and persisted profile row types
pub mod account;
/// Goal wizard options, draft, and submission
pub mod goal;
/// Parsed workout plan and goal record
pub mod plan;
/// Validated profile and measurement units
pub mod profile;

pub use account::{AuthEvent, AuthStateChange, OAuthProvider, ProfileRow, Session, User};
pub use goal::{Equipment, ExperienceLevel, GoalDraft, GoalSubmission, GoalType, Timeline};
pub use plan::{Exercise, GoalRecord, PlanRequest, PlanResult, ScheduleEntry, Workout};
pub use profile::{
    FitnessGoal, Gender, Height, HeightUnit, Profile, UnitPreferences, Weight, WeightUnit,
};
