// ABOUTME: Common test utilities and fixtures shared by integration tests
// ABOUTME: Provides logging setup, sample profiles, wizard drivers, and plan replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    dead_code,
    missing_docs
)]

use std::env;
use std::sync::Once;

use chrono::NaiveDate;
use fittracker::intelligence::{GoalWizard, ProfileInput, WizardStep};
use fittracker::models::{
    Equipment, ExperienceLevel, FitnessGoal, Gender, GoalSubmission, GoalType, Height, HeightUnit,
    Profile, Session, Timeline, User, Weight, WeightUnit,
};
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests
///
/// Set `TEST_LOG=debug` (or `info`, `warn`, `trace`) to see output.
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE" | "trace") => Level::TRACE,
            Ok("DEBUG" | "debug") => Level::DEBUG,
            Ok("INFO" | "info") => Level::INFO,
            Ok("WARN" | "warn") => Level::WARN,
            _ => Level::ERROR,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fixed "today" so ages and prompts are reproducible
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// Form answers that pass validation in metric units
pub fn valid_input() -> ProfileInput {
    ProfileInput {
        first_name: "Ana".to_owned(),
        last_name: "Silva".to_owned(),
        date_of_birth: "1990-03-04".to_owned(),
        gender: "female".to_owned(),
        weight: "62".to_owned(),
        height: "165".to_owned(),
        fitness_goal: "endurance".to_owned(),
    }
}

/// Validated profile matching [`valid_input`]
pub fn sample_profile() -> Profile {
    Profile {
        first_name: "Ana".to_owned(),
        last_name: "Silva".to_owned(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 3, 4).unwrap(),
        gender: Gender::Female,
        weight: Weight {
            value: 62.0,
            unit: WeightUnit::Kg,
        },
        height: Height {
            value: 165.0,
            unit: HeightUnit::Cm,
        },
        fitness_goal: FitnessGoal::Endurance,
    }
}

/// Narrative used by the wizard fixtures
pub const SAMPLE_NARRATIVE: &str =
    "I work long hours and only have early mornings. I love hiking on weekends.";

/// Submission equivalent to the wizard driven by [`wizard_on_review`]
pub fn sample_submission() -> GoalSubmission {
    GoalSubmission {
        goal_type: GoalType::ImproveEndurance,
        timeline: Timeline::TwelveWeeks,
        frequency: 4,
        experience_level: ExperienceLevel::Intermediate,
        equipment: vec![Equipment::Dumbbells],
        minutes_per_session: 45,
        injuries: "Sore left knee".to_owned(),
        narrative: SAMPLE_NARRATIVE.to_owned(),
    }
}

/// Wizard with every detail answered, sitting on the review step
pub fn wizard_on_review() -> GoalWizard {
    let mut wizard = GoalWizard::new();
    wizard.select_goal(GoalType::ImproveEndurance).unwrap();
    wizard.set_timeline(Timeline::TwelveWeeks).unwrap();
    wizard
        .set_experience_level(ExperienceLevel::Intermediate)
        .unwrap();
    wizard.set_frequency(4).unwrap();
    wizard.set_minutes_per_session(45).unwrap();
    wizard.toggle_equipment(Equipment::Dumbbells).unwrap();
    wizard.set_injuries("Sore left knee").unwrap();
    assert_eq!(wizard.next().unwrap(), WizardStep::Narrative);
    wizard.set_narrative(SAMPLE_NARRATIVE).unwrap();
    assert_eq!(wizard.next().unwrap(), WizardStep::Review);
    wizard
}

/// Plan JSON that passes the schema check
pub const VALID_PLAN_JSON: &str = r#"{
  "plan_name": "Sunrise Trail Builder",
  "personal_message": "Early mornings can become your favorite hour.",
  "overview": "Four short sessions that build toward longer weekend hikes.",
  "weekly_schedule": [
    { "day": "Monday", "workout_type": "Lower Body", "duration": "45 minutes", "focus": "Legs" },
    { "day": "Thursday", "workout_type": "Cardio Intervals", "duration": 45, "focus": "Heart" }
  ],
  "workouts": [
    {
      "name": "Lower Body",
      "exercises": [
        { "name": "Goblet Squat", "sets": 3, "reps": "10-12", "rest": "60 seconds", "notes": "Keep the knee tracking over the toes" },
        { "name": "Step-ups", "sets": "3", "reps": 12, "rest": 45 }
      ]
    }
  ],
  "personalized_tips": ["Lay out your shoes the night before"],
  "motivation_reminders": ["Every early session is a trail mile banked"]
}"#;

/// Model reply wrapping [`VALID_PLAN_JSON`] in prose and a code fence
pub fn chatty_reply() -> String {
    format!("Here is your plan!\n```json\n{VALID_PLAN_JSON}\n```\nEnjoy the trails.")
}

/// Session for a fresh identity with the given email
pub fn session_for(email: &str) -> Session {
    Session {
        access_token: format!("access-{email}"),
        refresh_token: Some(format!("refresh-{email}")),
        expires_at: None,
        user: User {
            id: Uuid::new_v4(),
            email: Some(email.to_owned()),
        },
    }
}
