// ABOUTME: Goal intake state machine driving SelectGoal, Details, Narrative, and Review
// ABOUTME: Accumulates a GoalDraft and finalizes it into a GoalSubmission on submit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Goal Intake Wizard
//!
//! ```text
//! SelectGoal --select_goal--> Details --next--> Narrative --next--> Review --finalize/complete--> Completed
//!     |  ^                       |                  |                  |
//!     |  +-------- back ---------+------ back ------+------ back ------+
//!     +-- back (exit callback) --> Exited
//! ```
//!
//! Going back never clears answers. Leaving the first step requires a goal
//! type. The narrative limit is enforced on every edit.

use std::fmt;

use fittracker_core::constants::goal::STEP_TITLES;
use fittracker_core::errors::WizardError;
use fittracker_core::models::{
    Equipment, ExperienceLevel, GoalDraft, GoalSubmission, GoalType, Timeline,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Pick one of the goal types
    SelectGoal,
    /// Timeline, frequency, experience, equipment, duration, injuries
    Details,
    /// Free-text personal story
    Narrative,
    /// Summary and plan generation
    Review,
}

impl WizardStep {
    /// Every step in order
    pub const ALL: [Self; 4] = [Self::SelectGoal, Self::Details, Self::Narrative, Self::Review];

    /// One-based position, as shown in the progress bar
    #[must_use]
    pub const fn number(self) -> usize {
        match self {
            Self::SelectGoal => 1,
            Self::Details => 2,
            Self::Narrative => 3,
            Self::Review => 4,
        }
    }

    /// Heading shown for this step
    #[must_use]
    pub const fn title(self) -> &'static str {
        STEP_TITLES[self.number() - 1]
    }

    /// Stable identifier for logs and errors
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelectGoal => "select_goal",
            Self::Details => "details",
            Self::Narrative => "narrative",
            Self::Review => "review",
        }
    }

    const fn previous(self) -> Option<Self> {
        match self {
            Self::SelectGoal => None,
            Self::Details => Some(Self::SelectGoal),
            Self::Narrative => Some(Self::Details),
            Self::Review => Some(Self::Narrative),
        }
    }

    const fn following(self) -> Option<Self> {
        match self {
            Self::SelectGoal => Some(Self::Details),
            Self::Details => Some(Self::Narrative),
            Self::Narrative => Some(Self::Review),
            Self::Review => None,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "step")]
pub enum WizardState {
    /// Collecting answers on a step
    Active(WizardStep),
    /// The user backed out of the first step
    Exited,
    /// A plan was generated from the submission
    Completed,
}

/// Outcome of a "back" action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Moved to the given step
    Moved(WizardStep),
    /// The exit callback ran and the wizard is finished
    Exited,
    /// Nothing happened
    Unchanged,
}

type ExitCallback = Box<dyn FnMut() + Send>;

/// Goal intake state machine
pub struct GoalWizard {
    state: WizardState,
    draft: GoalDraft,
    on_exit: Option<ExitCallback>,
}

impl fmt::Debug for GoalWizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalWizard")
            .field("state", &self.state)
            .field("draft", &self.draft)
            .field("has_exit_callback", &self.on_exit.is_some())
            .finish()
    }
}

impl Default for GoalWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalWizard {
    /// Fresh wizard on the first step without an exit callback
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: WizardState::Active(WizardStep::SelectGoal),
            draft: GoalDraft::default(),
            on_exit: None,
        }
    }

    /// Fresh wizard that calls `on_exit` when the user backs out of the first step
    #[must_use]
    pub fn with_exit<F>(on_exit: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self {
            on_exit: Some(Box::new(on_exit)),
            ..Self::new()
        }
    }

    /// Lifecycle state
    #[must_use]
    pub const fn state(&self) -> WizardState {
        self.state
    }

    /// Active step, if the wizard is still running
    #[must_use]
    pub const fn step(&self) -> Option<WizardStep> {
        match self.state {
            WizardState::Active(step) => Some(step),
            WizardState::Exited | WizardState::Completed => None,
        }
    }

    /// Answers so far
    #[must_use]
    pub const fn draft(&self) -> &GoalDraft {
        &self.draft
    }

    fn require_step(&self, expected: WizardStep, action: &'static str) -> Result<(), WizardError> {
        match self.state {
            WizardState::Active(step) if step == expected => Ok(()),
            WizardState::Active(step) => Err(WizardError::InvalidTransition {
                step: step.as_str(),
                action,
            }),
            WizardState::Exited | WizardState::Completed => Err(WizardError::Inactive),
        }
    }

    fn move_to(&mut self, from: WizardStep, to: WizardStep) -> WizardStep {
        self.state = WizardState::Active(to);
        debug!(from = %from, to = %to, "goal wizard transition");
        to
    }

    /// Record the goal type and move straight to the details step
    ///
    /// # Errors
    ///
    /// Fails unless the wizard is on the first step.
    pub fn select_goal(&mut self, goal_type: GoalType) -> Result<WizardStep, WizardError> {
        self.require_step(WizardStep::SelectGoal, "select a goal")?;
        self.draft.set_goal_type(goal_type);
        Ok(self.move_to(WizardStep::SelectGoal, WizardStep::Details))
    }

    /// Advance one step
    ///
    /// # Errors
    ///
    /// Fails on the first step when no goal type is recorded, on the review
    /// step (submit instead), and when the wizard is no longer active.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        let WizardState::Active(step) = self.state else {
            return Err(WizardError::Inactive);
        };
        if step == WizardStep::SelectGoal && self.draft.goal_type().is_none() {
            return Err(WizardError::GoalTypeRequired);
        }
        let to = step.following().ok_or(WizardError::InvalidTransition {
            step: step.as_str(),
            action: "continue",
        })?;
        Ok(self.move_to(step, to))
    }

    /// Go back one step, or exit from the first step when a callback was supplied
    pub fn back(&mut self) -> Transition {
        let WizardState::Active(step) = self.state else {
            return Transition::Unchanged;
        };
        if let Some(previous) = step.previous() {
            return Transition::Moved(self.move_to(step, previous));
        }
        match self.on_exit.as_mut() {
            Some(on_exit) => {
                on_exit();
                self.state = WizardState::Exited;
                debug!("goal wizard exited");
                Transition::Exited
            }
            None => Transition::Unchanged,
        }
    }

    /// Choose the timeline
    ///
    /// # Errors
    ///
    /// Fails outside the details step.
    pub fn set_timeline(&mut self, timeline: Timeline) -> Result<(), WizardError> {
        self.require_step(WizardStep::Details, "set the timeline")?;
        self.draft.set_timeline(timeline);
        Ok(())
    }

    /// Choose the experience level
    ///
    /// # Errors
    ///
    /// Fails outside the details step.
    pub fn set_experience_level(&mut self, level: ExperienceLevel) -> Result<(), WizardError> {
        self.require_step(WizardStep::Details, "set the experience level")?;
        self.draft.set_experience_level(level);
        Ok(())
    }

    /// Set workouts per week; out-of-range values are clamped
    ///
    /// # Errors
    ///
    /// Fails outside the details step.
    pub fn set_frequency(&mut self, frequency: u8) -> Result<u8, WizardError> {
        self.require_step(WizardStep::Details, "set the frequency")?;
        Ok(self.draft.set_frequency(frequency))
    }

    /// Set minutes per session; clamped and snapped to 5-minute steps
    ///
    /// # Errors
    ///
    /// Fails outside the details step.
    pub fn set_minutes_per_session(&mut self, minutes: u8) -> Result<u8, WizardError> {
        self.require_step(WizardStep::Details, "set the session length")?;
        Ok(self.draft.set_minutes_per_session(minutes))
    }

    /// Add or remove an equipment tag; returns whether it is now selected
    ///
    /// # Errors
    ///
    /// Fails outside the details step.
    pub fn toggle_equipment(&mut self, item: Equipment) -> Result<bool, WizardError> {
        self.require_step(WizardStep::Details, "change equipment")?;
        Ok(self.draft.toggle_equipment(item))
    }

    /// Replace the injury notes
    ///
    /// # Errors
    ///
    /// Fails outside the details step.
    pub fn set_injuries(&mut self, injuries: impl Into<String>) -> Result<(), WizardError> {
        self.require_step(WizardStep::Details, "set injuries")?;
        self.draft.set_injuries(injuries);
        Ok(())
    }

    /// Replace the narrative
    ///
    /// # Errors
    ///
    /// Fails outside the narrative step, or with
    /// [`WizardError::NarrativeTooLong`] leaving the text unchanged.
    pub fn set_narrative(&mut self, text: impl Into<String>) -> Result<(), WizardError> {
        self.require_step(WizardStep::Narrative, "edit the story")?;
        self.draft.set_narrative(text)
    }

    /// Append an inspiration snippet; returns `false` when it would not fit
    ///
    /// # Errors
    ///
    /// Fails outside the narrative step.
    pub fn append_inspiration(&mut self, snippet: &str) -> Result<bool, WizardError> {
        self.require_step(WizardStep::Narrative, "add a prompt")?;
        let appended = self.draft.append_narrative(snippet);
        if !appended {
            debug!(
                current_len = self.draft.narrative_len(),
                "inspiration prompt ignored, narrative limit reached"
            );
        }
        Ok(appended)
    }

    /// Produce the submission from the review step
    ///
    /// The wizard stays on review so a failed generation can be retried.
    ///
    /// # Errors
    ///
    /// Fails outside the review step or when a required detail is missing.
    pub fn finalize(&self) -> Result<GoalSubmission, WizardError> {
        self.require_step(WizardStep::Review, "generate a plan")?;
        GoalSubmission::try_from(&self.draft)
    }

    /// Mark the wizard finished after a plan was generated
    ///
    /// # Errors
    ///
    /// Fails outside the review step.
    pub fn complete(&mut self) -> Result<(), WizardError> {
        self.require_step(WizardStep::Review, "finish")?;
        self.state = WizardState::Completed;
        debug!("goal wizard completed");
        Ok(())
    }
}
