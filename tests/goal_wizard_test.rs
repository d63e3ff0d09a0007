// ABOUTME: Integration tests for the goal intake state machine
// ABOUTME: Covers step navigation, exit handling, detail normalization, and finalize rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{sample_submission, wizard_on_review};
use fittracker::constants::goal::{INSPIRATION_PROMPTS, MAX_NARRATIVE_CHARS};
use fittracker::errors::WizardError;
use fittracker::intelligence::{GoalWizard, Transition, WizardState, WizardStep};
use fittracker::models::{Equipment, ExperienceLevel, GoalType, Timeline};

fn wizard_on_details() -> GoalWizard {
    let mut wizard = GoalWizard::new();
    wizard.select_goal(GoalType::BuildMuscle).unwrap();
    wizard
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_starts_on_select_goal_with_defaults() {
    let wizard = GoalWizard::new();

    assert_eq!(wizard.step(), Some(WizardStep::SelectGoal));
    assert_eq!(wizard.draft().goal_type(), None);
    assert_eq!(wizard.draft().frequency(), 3);
    assert_eq!(wizard.draft().minutes_per_session(), 30);
    assert!(wizard.draft().equipment().is_empty());
}

#[test]
fn test_next_requires_goal_type() {
    let mut wizard = GoalWizard::new();

    assert_eq!(wizard.next(), Err(WizardError::GoalTypeRequired));
    assert_eq!(wizard.step(), Some(WizardStep::SelectGoal));
}

#[test]
fn test_selecting_goal_auto_advances() {
    let mut wizard = GoalWizard::new();

    let step = wizard.select_goal(GoalType::LoseWeight).unwrap();
    assert_eq!(step, WizardStep::Details);
    assert_eq!(wizard.draft().goal_type(), Some(GoalType::LoseWeight));
}

#[test]
fn test_back_keeps_answers() {
    let mut wizard = wizard_on_review();

    assert_eq!(wizard.back(), Transition::Moved(WizardStep::Narrative));
    assert_eq!(wizard.back(), Transition::Moved(WizardStep::Details));
    assert_eq!(wizard.back(), Transition::Moved(WizardStep::SelectGoal));

    assert_eq!(wizard.draft().goal_type(), Some(GoalType::ImproveEndurance));
    assert_eq!(wizard.draft().timeline(), Some(Timeline::TwelveWeeks));
    assert_eq!(wizard.draft().equipment(), &[Equipment::Dumbbells]);
    assert!(!wizard.draft().narrative().is_empty());

    // Changing the goal on the first step is allowed and advances again
    assert_eq!(
        wizard.select_goal(GoalType::StrengthTraining).unwrap(),
        WizardStep::Details
    );
    assert_eq!(wizard.draft().timeline(), Some(Timeline::TwelveWeeks));
}

#[test]
fn test_back_on_first_step_without_exit_is_a_no_op() {
    let mut wizard = GoalWizard::new();

    assert_eq!(wizard.back(), Transition::Unchanged);
    assert_eq!(wizard.state(), WizardState::Active(WizardStep::SelectGoal));
}

#[test]
fn test_back_on_first_step_runs_exit_once() {
    let exits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&exits);
    let mut wizard = GoalWizard::with_exit(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(wizard.back(), Transition::Exited);
    assert_eq!(wizard.state(), WizardState::Exited);
    assert_eq!(wizard.step(), None);

    // An exited wizard ignores further input
    assert_eq!(wizard.back(), Transition::Unchanged);
    assert_eq!(wizard.next(), Err(WizardError::Inactive));
    assert_eq!(
        wizard.select_goal(GoalType::GeneralFitness),
        Err(WizardError::Inactive)
    );
    assert_eq!(exits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_details_to_narrative_is_not_blocked() {
    let mut wizard = wizard_on_details();

    assert_eq!(wizard.next().unwrap(), WizardStep::Narrative);
    assert_eq!(wizard.next().unwrap(), WizardStep::Review);
}

#[test]
fn test_next_on_review_is_rejected() {
    let mut wizard = wizard_on_review();

    assert!(matches!(
        wizard.next(),
        Err(WizardError::InvalidTransition { step: "review", .. })
    ));
    assert_eq!(wizard.step(), Some(WizardStep::Review));
}

#[test]
fn test_step_titles_follow_order() {
    let titles: Vec<_> = WizardStep::ALL.iter().map(|step| step.title()).collect();
    assert_eq!(
        titles,
        [
            "Choose Your Goal",
            "Goal Details",
            "Tell Your Story",
            "Generate Your Plan"
        ]
    );
}

// ============================================================================
// Details
// ============================================================================

#[test]
fn test_detail_setters_only_work_on_details_step() {
    let mut wizard = GoalWizard::new();

    assert!(matches!(
        wizard.set_timeline(Timeline::FourWeeks),
        Err(WizardError::InvalidTransition { step: "select_goal", .. })
    ));
    assert!(wizard.set_frequency(4).is_err());
    assert!(wizard.toggle_equipment(Equipment::FullGym).is_err());
    assert_eq!(wizard.draft().frequency(), 3);
}

#[test]
fn test_frequency_is_clamped() {
    let mut wizard = wizard_on_details();

    assert_eq!(wizard.set_frequency(1).unwrap(), 2);
    assert_eq!(wizard.set_frequency(9).unwrap(), 7);
    assert_eq!(wizard.set_frequency(5).unwrap(), 5);
    assert_eq!(wizard.draft().frequency(), 5);
}

#[test]
fn test_minutes_are_clamped_and_snapped() {
    let mut wizard = wizard_on_details();

    assert_eq!(wizard.set_minutes_per_session(5).unwrap(), 15);
    assert_eq!(wizard.set_minutes_per_session(200).unwrap(), 90);
    assert_eq!(wizard.set_minutes_per_session(47).unwrap(), 45);
    assert_eq!(wizard.set_minutes_per_session(48).unwrap(), 50);
    assert_eq!(wizard.set_minutes_per_session(60).unwrap(), 60);
}

#[test]
fn test_equipment_toggles_in_selection_order() {
    let mut wizard = wizard_on_details();

    assert!(wizard.toggle_equipment(Equipment::FullGym).unwrap());
    assert!(wizard.toggle_equipment(Equipment::Dumbbells).unwrap());
    assert_eq!(
        wizard.draft().equipment(),
        &[Equipment::FullGym, Equipment::Dumbbells]
    );

    assert!(!wizard.toggle_equipment(Equipment::FullGym).unwrap());
    assert_eq!(wizard.draft().equipment(), &[Equipment::Dumbbells]);
}

// ============================================================================
// Narrative
// ============================================================================

#[test]
fn test_narrative_limit_counts_characters() {
    let mut wizard = wizard_on_details();
    wizard.next().unwrap();

    let at_limit = "é".repeat(MAX_NARRATIVE_CHARS);
    wizard.set_narrative(at_limit.clone()).unwrap();
    assert_eq!(wizard.draft().narrative_len(), MAX_NARRATIVE_CHARS);

    let over = "a".repeat(MAX_NARRATIVE_CHARS + 1);
    assert_eq!(
        wizard.set_narrative(over),
        Err(WizardError::NarrativeTooLong {
            length: MAX_NARRATIVE_CHARS + 1,
            max: MAX_NARRATIVE_CHARS
        })
    );
    assert_eq!(wizard.draft().narrative(), at_limit);
}

#[test]
fn test_inspiration_prompts_append_with_space() {
    let mut wizard = wizard_on_details();
    wizard.next().unwrap();

    assert!(wizard.append_inspiration(INSPIRATION_PROMPTS[0]).unwrap());
    assert!(wizard.append_inspiration(INSPIRATION_PROMPTS[3]).unwrap());
    assert_eq!(
        wizard.draft().narrative(),
        "I work long hours and... I really enjoy..."
    );
}

#[test]
fn test_inspiration_ignored_when_it_would_overflow() {
    let mut wizard = wizard_on_details();
    wizard.next().unwrap();
    let nearly_full = "x".repeat(MAX_NARRATIVE_CHARS - 5);
    wizard.set_narrative(nearly_full.clone()).unwrap();

    assert!(!wizard.append_inspiration(INSPIRATION_PROMPTS[1]).unwrap());
    assert_eq!(wizard.draft().narrative(), nearly_full);
}

#[test]
fn test_narrative_only_editable_on_story_step() {
    let mut wizard = wizard_on_details();

    assert!(wizard.set_narrative("hello").is_err());
    assert!(wizard.append_inspiration("hello").is_err());
}

// ============================================================================
// Finalize
// ============================================================================

#[test]
fn test_finalize_on_review_builds_submission() {
    let wizard = wizard_on_review();

    assert_eq!(wizard.finalize().unwrap(), sample_submission());
    // Finalize does not leave the review step
    assert_eq!(wizard.step(), Some(WizardStep::Review));
}

#[test]
fn test_finalize_requires_timeline_and_experience() {
    let mut wizard = wizard_on_details();
    wizard.next().unwrap();
    wizard.next().unwrap();

    assert_eq!(
        wizard.finalize(),
        Err(WizardError::MissingSelection { field: "timeline" })
    );

    wizard.back();
    wizard.back();
    wizard.set_timeline(Timeline::EightWeeks).unwrap();
    wizard.next().unwrap();
    wizard.next().unwrap();
    assert_eq!(
        wizard.finalize(),
        Err(WizardError::MissingSelection {
            field: "experience level"
        })
    );

    wizard.back();
    wizard.back();
    wizard
        .set_experience_level(ExperienceLevel::Beginner)
        .unwrap();
    wizard.next().unwrap();
    wizard.next().unwrap();
    let submission = wizard.finalize().unwrap();
    assert_eq!(submission.goal_type, GoalType::BuildMuscle);
    assert_eq!(submission.frequency, 3);
    assert_eq!(submission.minutes_per_session, 30);
    assert!(submission.narrative.is_empty());
}

#[test]
fn test_finalize_trims_injury_notes() {
    let mut wizard = wizard_on_details();
    wizard.set_timeline(Timeline::SixMonths).unwrap();
    wizard.set_experience_level(ExperienceLevel::Advanced).unwrap();
    wizard.set_injuries("   ").unwrap();
    wizard.next().unwrap();
    wizard.next().unwrap();

    assert_eq!(wizard.finalize().unwrap().injuries, "");
}

#[test]
fn test_finalize_outside_review_is_rejected() {
    let wizard = wizard_on_details();

    assert!(matches!(
        wizard.finalize(),
        Err(WizardError::InvalidTransition { step: "details", .. })
    ));
}

#[test]
fn test_complete_ends_the_wizard() {
    let mut wizard = wizard_on_review();

    wizard.complete().unwrap();
    assert_eq!(wizard.state(), WizardState::Completed);
    assert_eq!(wizard.finalize(), Err(WizardError::Inactive));
    assert_eq!(wizard.back(), Transition::Unchanged);
}
