// ABOUTME: Workout plan records parsed from model output plus the plan request and goal record
// ABOUTME: Parsing is lenient; PlanResult::validate enforces the shape callers rely on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::goal::GoalSubmission;
use super::profile::Profile;
use crate::errors::PlanSchemaError;

/// Finalized input to the prompt compiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Validated profile of the requesting user
    pub profile: Profile,
    /// Finalized goal answers
    pub goal: GoalSubmission,
}

/// One row of the weekly schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleEntry {
    /// Day label, e.g. "Monday"
    #[serde(deserialize_with = "lenient_text")]
    pub day: Option<String>,
    /// Kind of session
    #[serde(deserialize_with = "lenient_text")]
    pub workout_type: Option<String>,
    /// Session length as written by the model
    #[serde(deserialize_with = "lenient_text")]
    pub duration: Option<String>,
    /// Focus of the session
    #[serde(deserialize_with = "lenient_text")]
    pub focus: Option<String>,
}

/// One exercise inside a workout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exercise {
    /// Exercise name
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Number of sets
    #[serde(deserialize_with = "lenient_count")]
    pub sets: Option<u32>,
    /// Repetitions, e.g. "10-12"
    #[serde(deserialize_with = "lenient_text")]
    pub reps: Option<String>,
    /// Rest between sets
    #[serde(deserialize_with = "lenient_text")]
    pub rest: Option<String>,
    /// Form cues or notes
    #[serde(deserialize_with = "lenient_text")]
    pub notes: Option<String>,
}

/// A named workout and its exercises
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workout {
    /// Workout name
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Exercises in order
    #[serde(deserialize_with = "lenient_list")]
    pub exercises: Vec<Exercise>,
}

/// Plan parsed from a model reply
///
/// Every field is optional because the reply is untrusted: wrong-typed
/// lists decode as empty and scalar or list values in text fields become
/// text. Call [`PlanResult::validate`] before relying on the content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanResult {
    /// Plan title
    #[serde(deserialize_with = "lenient_text")]
    pub plan_name: Option<String>,
    /// Message addressing the user's story
    #[serde(deserialize_with = "lenient_text")]
    pub personal_message: Option<String>,
    /// Summary of the approach
    #[serde(deserialize_with = "lenient_text")]
    pub overview: Option<String>,
    /// Weekly schedule in order
    #[serde(deserialize_with = "lenient_list")]
    pub weekly_schedule: Vec<ScheduleEntry>,
    /// Workouts in order
    #[serde(deserialize_with = "lenient_list")]
    pub workouts: Vec<Workout>,
    /// Tips tailored to the user
    #[serde(deserialize_with = "lenient_text_list")]
    pub personalized_tips: Vec<String>,
    /// Short motivational reminders
    #[serde(deserialize_with = "lenient_text_list")]
    pub motivation_reminders: Vec<String>,
}

impl PlanResult {
    /// Check that the plan carries the content a caller needs
    ///
    /// # Errors
    ///
    /// Returns [`PlanSchemaError`] listing every missing piece.
    pub fn validate(&self) -> Result<(), PlanSchemaError> {
        let mut violations = Vec::new();
        if is_blank(self.plan_name.as_deref()) {
            violations.push("plan_name".to_owned());
        }
        if self.weekly_schedule.is_empty() {
            violations.push("weekly_schedule".to_owned());
        }
        if self.workouts.is_empty() {
            violations.push("workouts".to_owned());
        }
        for (index, workout) in self.workouts.iter().enumerate() {
            if workout.exercises.is_empty() {
                violations.push(format!("workouts[{index}].exercises"));
            }
            for (position, exercise) in workout.exercises.iter().enumerate() {
                if is_blank(exercise.name.as_deref()) {
                    violations.push(format!("workouts[{index}].exercises[{position}].name"));
                }
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(PlanSchemaError { violations })
        }
    }
}

/// What a caller would persist after a successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    /// Owning identity
    pub user_id: Uuid,
    /// Finalized goal answers
    pub goal: GoalSubmission,
    /// Validated plan
    pub workout_plan: PlanResult,
    /// When the plan was generated
    pub created_at: DateTime<Utc>,
}

fn is_blank(value: Option<&str>) -> bool {
    !matches!(value, Some(text) if !text.trim().is_empty())
}

/// Text form of a loosely typed value; lists are joined with ", "
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.into_iter().filter_map(value_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Null | Value::Object(_) => None,
    }
}

// Models sometimes emit numbers or lists where strings are expected
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(value_text))
}

/// Items that do not decode as `T` are dropped; a non-list is empty
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// A single text value counts as a one-item list
fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(value_text).collect(),
        Some(other) => value_text(other).into_iter().collect(),
        None => Vec::new(),
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}
