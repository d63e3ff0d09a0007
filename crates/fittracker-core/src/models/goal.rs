// ABOUTME: Goal wizard option catalogs, the in-progress GoalDraft, and GoalSubmission
// ABOUTME: Draft setters enforce frequency, duration, equipment, and narrative invariants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::goal::{
    DEFAULT_SESSION_MINUTES, DEFAULT_WEEKLY_FREQUENCY, MAX_NARRATIVE_CHARS, MAX_SESSION_MINUTES,
    MAX_WEEKLY_FREQUENCY, MIN_SESSION_MINUTES, MIN_WEEKLY_FREQUENCY, SESSION_MINUTES_STEP,
};
use crate::errors::WizardError;

/// What the user wants the plan to achieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalType {
    /// Burn fat and get leaner
    LoseWeight,
    /// Increase strength and muscle mass
    BuildMuscle,
    /// Boost cardiovascular fitness
    ImproveEndurance,
    /// Overall health and wellness
    GeneralFitness,
    /// Focus on power and strength gains
    StrengthTraining,
}

impl GoalType {
    /// Every option in display order
    pub const ALL: [Self; 5] = [
        Self::LoseWeight,
        Self::BuildMuscle,
        Self::ImproveEndurance,
        Self::GeneralFitness,
        Self::StrengthTraining,
    ];

    /// Serialized identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoseWeight => "lose-weight",
            Self::BuildMuscle => "build-muscle",
            Self::ImproveEndurance => "improve-endurance",
            Self::GeneralFitness => "general-fitness",
            Self::StrengthTraining => "strength-training",
        }
    }

    /// Card title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::LoseWeight => "Lose Weight",
            Self::BuildMuscle => "Build Muscle",
            Self::ImproveEndurance => "Improve Endurance",
            Self::GeneralFitness => "General Fitness",
            Self::StrengthTraining => "Strength Training",
        }
    }

    /// Card description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::LoseWeight => "Burn fat and get leaner",
            Self::BuildMuscle => "Increase strength and muscle mass",
            Self::ImproveEndurance => "Boost cardiovascular fitness",
            Self::GeneralFitness => "Overall health and wellness",
            Self::StrengthTraining => "Focus on power and strength gains",
        }
    }

    /// Parse a serialized identifier
    #[must_use]
    pub fn from_option(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|goal| goal.as_str() == value)
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long the user wants to work toward the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    /// Four weeks
    #[serde(rename = "4-weeks")]
    FourWeeks,
    /// Eight weeks
    #[serde(rename = "8-weeks")]
    EightWeeks,
    /// Twelve weeks
    #[serde(rename = "12-weeks")]
    TwelveWeeks,
    /// Six months
    #[serde(rename = "6-months")]
    SixMonths,
}

impl Timeline {
    /// Every option in display order
    pub const ALL: [Self; 4] = [
        Self::FourWeeks,
        Self::EightWeeks,
        Self::TwelveWeeks,
        Self::SixMonths,
    ];

    /// Serialized identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FourWeeks => "4-weeks",
            Self::EightWeeks => "8-weeks",
            Self::TwelveWeeks => "12-weeks",
            Self::SixMonths => "6-months",
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FourWeeks => "4 Weeks",
            Self::EightWeeks => "8 Weeks",
            Self::TwelveWeeks => "12 Weeks",
            Self::SixMonths => "6 Months",
        }
    }

    /// Parse a serialized identifier
    #[must_use]
    pub fn from_option(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|timeline| timeline.as_str() == value)
    }
}

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    /// New to structured training
    Beginner,
    /// Some consistent training history
    Intermediate,
    /// Long training history
    Advanced,
}

impl ExperienceLevel {
    /// Every option in display order
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Serialized identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse a serialized identifier
    #[must_use]
    pub fn from_option(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }
}

/// Equipment the user has access to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Equipment {
    /// Bodyweight only
    None,
    /// Dumbbells
    Dumbbells,
    /// Resistance bands
    ResistanceBands,
    /// Full gym access
    FullGym,
}

impl Equipment {
    /// Every option in display order
    pub const ALL: [Self; 4] = [
        Self::None,
        Self::Dumbbells,
        Self::ResistanceBands,
        Self::FullGym,
    ];

    /// Serialized identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Dumbbells => "dumbbells",
            Self::ResistanceBands => "resistance-bands",
            Self::FullGym => "full-gym",
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "No Equipment",
            Self::Dumbbells => "Dumbbells",
            Self::ResistanceBands => "Resistance Bands",
            Self::FullGym => "Full Gym",
        }
    }

    /// Parse a serialized identifier
    #[must_use]
    pub fn from_option(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.as_str() == value)
    }
}

/// Answers accumulated while the wizard is running
///
/// Setters keep every field inside its documented range, so a draft can never
/// hold an out-of-range frequency, duration, or an overlong narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalDraft {
    goal_type: Option<GoalType>,
    timeline: Option<Timeline>,
    frequency: u8,
    experience_level: Option<ExperienceLevel>,
    equipment: Vec<Equipment>,
    minutes_per_session: u8,
    injuries: String,
    narrative: String,
}

impl Default for GoalDraft {
    fn default() -> Self {
        Self {
            goal_type: None,
            timeline: None,
            frequency: DEFAULT_WEEKLY_FREQUENCY,
            experience_level: None,
            equipment: Vec::new(),
            minutes_per_session: DEFAULT_SESSION_MINUTES,
            injuries: String::new(),
            narrative: String::new(),
        }
    }
}

impl GoalDraft {
    /// Chosen goal type
    #[must_use]
    pub const fn goal_type(&self) -> Option<GoalType> {
        self.goal_type
    }

    /// Chosen timeline
    #[must_use]
    pub const fn timeline(&self) -> Option<Timeline> {
        self.timeline
    }

    /// Workouts per week
    #[must_use]
    pub const fn frequency(&self) -> u8 {
        self.frequency
    }

    /// Chosen experience level
    #[must_use]
    pub const fn experience_level(&self) -> Option<ExperienceLevel> {
        self.experience_level
    }

    /// Selected equipment in selection order
    #[must_use]
    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    /// Minutes per workout
    #[must_use]
    pub const fn minutes_per_session(&self) -> u8 {
        self.minutes_per_session
    }

    /// Injury or limitation notes
    #[must_use]
    pub fn injuries(&self) -> &str {
        &self.injuries
    }

    /// Personal narrative
    #[must_use]
    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    /// Narrative length in characters
    #[must_use]
    pub fn narrative_len(&self) -> usize {
        self.narrative.chars().count()
    }

    /// Record the goal type
    pub fn set_goal_type(&mut self, goal_type: GoalType) {
        self.goal_type = Some(goal_type);
    }

    /// Record the timeline
    pub fn set_timeline(&mut self, timeline: Timeline) {
        self.timeline = Some(timeline);
    }

    /// Record the experience level
    pub fn set_experience_level(&mut self, level: ExperienceLevel) {
        self.experience_level = Some(level);
    }

    /// Set workouts per week, clamped to 2..=7; returns the stored value
    pub fn set_frequency(&mut self, frequency: u8) -> u8 {
        self.frequency = frequency.clamp(MIN_WEEKLY_FREQUENCY, MAX_WEEKLY_FREQUENCY);
        self.frequency
    }

    /// Set minutes per session, clamped to 15..=90 and snapped to the nearest 5
    pub fn set_minutes_per_session(&mut self, minutes: u8) -> u8 {
        let clamped = minutes.clamp(MIN_SESSION_MINUTES, MAX_SESSION_MINUTES);
        let half_step = SESSION_MINUTES_STEP / 2;
        let snapped = (clamped + half_step) / SESSION_MINUTES_STEP * SESSION_MINUTES_STEP;
        self.minutes_per_session = snapped.min(MAX_SESSION_MINUTES);
        self.minutes_per_session
    }

    /// Add the tag if absent, remove it if present; returns whether it is now selected
    pub fn toggle_equipment(&mut self, item: Equipment) -> bool {
        if let Some(position) = self.equipment.iter().position(|selected| *selected == item) {
            self.equipment.remove(position);
            false
        } else {
            self.equipment.push(item);
            true
        }
    }

    /// Replace the injury notes
    pub fn set_injuries(&mut self, injuries: impl Into<String>) {
        self.injuries = injuries.into();
    }

    /// Replace the narrative
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NarrativeTooLong`] and leaves the narrative
    /// unchanged when `text` exceeds the character limit.
    pub fn set_narrative(&mut self, text: impl Into<String>) -> Result<(), WizardError> {
        let text = text.into();
        let length = text.chars().count();
        if length > MAX_NARRATIVE_CHARS {
            return Err(WizardError::NarrativeTooLong {
                length,
                max: MAX_NARRATIVE_CHARS,
            });
        }
        self.narrative = text;
        Ok(())
    }

    /// Append a snippet, space-separated when text already exists
    ///
    /// Returns `false` and leaves the narrative unchanged when the result would
    /// exceed the character limit.
    pub fn append_narrative(&mut self, snippet: &str) -> bool {
        let candidate = if self.narrative.is_empty() {
            snippet.to_owned()
        } else {
            format!("{} {snippet}", self.narrative)
        };
        self.set_narrative(candidate).is_ok()
    }
}

/// Finalized goal handed to the prompt compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSubmission {
    /// Goal type
    pub goal_type: GoalType,
    /// Timeline
    pub timeline: Timeline,
    /// Workouts per week
    pub frequency: u8,
    /// Experience level
    pub experience_level: ExperienceLevel,
    /// Available equipment, possibly empty
    pub equipment: Vec<Equipment>,
    /// Minutes per workout
    pub minutes_per_session: u8,
    /// Injury notes, possibly empty
    pub injuries: String,
    /// Personal narrative, possibly empty
    pub narrative: String,
}

impl TryFrom<&GoalDraft> for GoalSubmission {
    type Error = WizardError;

    fn try_from(draft: &GoalDraft) -> Result<Self, Self::Error> {
        let goal_type = draft.goal_type.ok_or(WizardError::GoalTypeRequired)?;
        let timeline = draft
            .timeline
            .ok_or(WizardError::MissingSelection { field: "timeline" })?;
        let experience_level = draft
            .experience_level
            .ok_or(WizardError::MissingSelection {
                field: "experience level",
            })?;
        Ok(Self {
            goal_type,
            timeline,
            frequency: draft.frequency,
            experience_level,
            equipment: draft.equipment.clone(),
            minutes_per_session: draft.minutes_per_session,
            injuries: draft.injuries.trim().to_owned(),
            narrative: draft.narrative.clone(),
        })
    }
}
