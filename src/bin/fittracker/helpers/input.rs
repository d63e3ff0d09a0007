// ABOUTME: Loads onboarding and goal answer files for the fittracker CLI
// ABOUTME: Replays goal answers through the wizard so every step rule is enforced
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use fittracker::intelligence::{validate_profile, GoalWizard, ProfileInput};
use fittracker::models::{
    Equipment, ExperienceLevel, GoalType, Profile, Timeline, UnitPreferences,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Onboarding answers as typed on the form
#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(flatten)]
    input: ProfileInput,
    #[serde(default)]
    units: UnitPreferences,
}

/// Goal wizard answers
#[derive(Debug, Deserialize)]
struct GoalAnswers {
    goal_type: GoalType,
    timeline: Option<Timeline>,
    experience_level: Option<ExperienceLevel>,
    frequency: Option<u32>,
    minutes_per_session: Option<u32>,
    #[serde(default)]
    equipment: Vec<Equipment>,
    #[serde(default)]
    injuries: String,
    #[serde(default)]
    narrative: String,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Load and validate the onboarding answers
pub fn load_profile(path: &Path, today: NaiveDate) -> Result<Profile> {
    let file: ProfileFile = read_json(path)?;
    match validate_profile(&file.input, file.units, today) {
        Ok(profile) => Ok(profile),
        Err(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {field}: {message}");
            }
            bail!("profile is invalid: {errors}")
        }
    }
}

/// Drive a wizard through every step with the answers in `path`
///
/// The returned wizard is on its review step.
pub fn load_goal(path: &Path) -> Result<GoalWizard> {
    wizard_from_answers(read_json(path)?)
}

/// Out-of-range numbers saturate; the wizard setters clamp them
fn saturating_u8(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn wizard_from_answers(answers: GoalAnswers) -> Result<GoalWizard> {
    let mut wizard = GoalWizard::new();

    wizard.select_goal(answers.goal_type)?;
    if let Some(timeline) = answers.timeline {
        wizard.set_timeline(timeline)?;
    }
    if let Some(level) = answers.experience_level {
        wizard.set_experience_level(level)?;
    }
    if let Some(frequency) = answers.frequency {
        wizard.set_frequency(saturating_u8(frequency))?;
    }
    if let Some(minutes) = answers.minutes_per_session {
        wizard.set_minutes_per_session(saturating_u8(minutes))?;
    }
    for item in answers.equipment {
        if !wizard.draft().equipment().contains(&item) {
            wizard.toggle_equipment(item)?;
        }
    }
    wizard.set_injuries(answers.injuries)?;
    wizard.next()?;
    wizard.set_narrative(answers.narrative)?;
    wizard.next()?;
    Ok(wizard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(json: &str) -> GoalAnswers {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_out_of_range_numbers_are_clamped() {
        let wizard = wizard_from_answers(answers(
            r#"{"goal_type": "build-muscle", "timeline": "4-weeks", "experience_level": "beginner",
                "frequency": 40, "minutes_per_session": 300}"#,
        ))
        .unwrap();

        let goal = wizard.finalize().unwrap();
        assert_eq!(goal.frequency, 7);
        assert_eq!(goal.minutes_per_session, 90);
    }

    #[test]
    fn test_answers_reach_review() {
        let wizard = wizard_from_answers(answers(
            r#"{"goal_type": "lose-weight", "timeline": "12-weeks", "experience_level": "advanced",
                "minutes_per_session": 47, "equipment": ["dumbbells", "dumbbells"]}"#,
        ))
        .unwrap();

        let goal = wizard.finalize().unwrap();
        assert_eq!(goal.minutes_per_session, 45);
        assert_eq!(goal.equipment, vec![Equipment::Dumbbells]);
    }
}
