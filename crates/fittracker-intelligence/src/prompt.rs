// ABOUTME: Deterministic prompt compiler for personalized workout plan requests
// ABOUTME: Derives age, BMI, and BMI category and embeds the JSON response template
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{NaiveDate, Utc};
use fittracker_core::constants::plan::NO_INJURIES_TEXT;
use fittracker_core::models::{GoalSubmission, PlanRequest, Profile};

use crate::algorithms::{age_on, calculate_bmi, BmiCategory};

/// Response shape the generator is asked to follow
const RESPONSE_TEMPLATE: &str = r#"{
  "plan_name": "A name that reflects their journey",
  "personal_message": "An encouraging message showing you understand them",
  "overview": "How the plan addresses their situation",
  "weekly_schedule": [
    {
      "day": "Monday",
      "workout_type": "Upper Body Strength",
      "duration": "__DURATION__ minutes",
      "focus": "Chest, shoulders, triceps"
    }
  ],
  "workouts": [
    {
      "name": "Upper Body Strength",
      "exercises": [
        {
          "name": "Push-ups",
          "sets": 3,
          "reps": "8-12",
          "rest": "60 seconds",
          "notes": "Drop to knees if needed"
        }
      ]
    }
  ],
  "personalized_tips": ["Advice tied to their specific situation"],
  "motivation_reminders": ["Reminders that speak to what drives them"]
}"#;

/// Render the plan prompt for `profile` and `goal` as of `today`
///
/// Identical inputs always produce identical output. Measurements are
/// normalized to metric before the BMI is computed.
#[must_use]
pub fn compile_prompt(profile: &Profile, goal: &GoalSubmission, today: NaiveDate) -> String {
    let age = age_on(profile.date_of_birth, today);
    let bmi = calculate_bmi(profile.weight_kg(), profile.height_cm());
    let category = BmiCategory::from_bmi(bmi);
    let equipment = goal
        .equipment
        .iter()
        .map(|item| item.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let injuries = if goal.injuries.trim().is_empty() {
        NO_INJURIES_TEXT
    } else {
        goal.injuries.as_str()
    };
    let response_template =
        RESPONSE_TEMPLATE.replace("__DURATION__", &goal.minutes_per_session.to_string());

    format!(
        "You are an empathetic, expert personal trainer holding a one-on-one consultation. \
Design a personalized workout plan for this person.

PERSON DETAILS:
- Age: {age} years old
- Gender: {gender}
- BMI: {bmi:.1} ({category})
- Experience: {experience}
- Available time: {minutes} minutes per session
- Frequency: {frequency} days per week
- Equipment: {equipment}
- Injuries/Limitations: {injuries}

PRIMARY GOAL: {goal_type}
Timeline: {timeline}

PERSONAL CONTEXT (MOST IMPORTANT - READ CAREFULLY):
\"{narrative}\"

Shape the plan around the story above. Pay close attention to:
- What motivates them
- Struggles or past attempts they mention
- Time pressure and lifestyle constraints
- Things they enjoy or dislike
- How they feel about exercise

The plan must read as written for this person, not as a generic program. Include:
1. A welcome message that acknowledges their story
2. A weekly schedule that fits their life
3. Exercises they are likely to enjoy
4. Sets, reps, and rest periods
5. Motivation tips drawn from their story
6. Ways to get past the challenges they described

Respond with JSON in exactly this structure:
{response_template}
",
        gender = profile.gender.as_str(),
        experience = goal.experience_level.as_str(),
        minutes = goal.minutes_per_session,
        frequency = goal.frequency,
        goal_type = goal.goal_type.as_str(),
        timeline = goal.timeline.as_str(),
        narrative = goal.narrative,
    )
}

/// Render the prompt using the current UTC date for the age
#[must_use]
pub fn compile_prompt_today(profile: &Profile, goal: &GoalSubmission) -> String {
    compile_prompt(profile, goal, Utc::now().date_naive())
}

/// Render the prompt for a finalized request
#[must_use]
pub fn compile_plan_request(request: &PlanRequest, today: NaiveDate) -> String {
    compile_prompt(&request.profile, &request.goal, today)
}
