// ABOUTME: Onboarding form validation turning raw field strings into a typed Profile
// ABOUTME: Step-scoped checks, unit-aware ranges, and unit toggles that clear the value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Profile Validation
//!
//! The onboarding form has two steps. Step one covers identity (names, date of
//! birth, gender) and step two covers the body and goal (weight, height,
//! fitness goal). Each step must validate with zero errors before the form
//! advances, and the final submission validates both.

use chrono::NaiveDate;
use fittracker_core::constants::profile::{messages, MAX_AGE_YEARS, MIN_AGE_YEARS};
use fittracker_core::errors::{FieldErrors, ProfileField};
use fittracker_core::models::{
    FitnessGoal, Gender, Height, HeightUnit, Profile, UnitPreferences, Weight, WeightUnit,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::age_on;

/// Raw onboarding field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// ISO `YYYY-MM-DD`
    pub date_of_birth: String,
    /// Gender option id, empty for the placeholder
    pub gender: String,
    /// Weight in the selected unit
    pub weight: String,
    /// Height in the selected unit
    pub height: String,
    /// Fitness goal option id, empty for the placeholder
    pub fitness_goal: String,
}

impl ProfileInput {
    fn field_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::DateOfBirth => &mut self.date_of_birth,
            ProfileField::Gender => &mut self.gender,
            ProfileField::Weight => &mut self.weight,
            ProfileField::Height => &mut self.height,
            ProfileField::FitnessGoal => &mut self.fitness_goal,
        }
    }
}

struct Identity {
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    gender: Gender,
}

struct Body {
    weight: Weight,
    height: Height,
    fitness_goal: FitnessGoal,
}

fn parse_identity(input: &ProfileInput, today: NaiveDate) -> Result<Identity, FieldErrors> {
    let mut errors = FieldErrors::new();

    let first_name = input.first_name.trim();
    if first_name.is_empty() {
        errors.insert(ProfileField::FirstName, messages::FIRST_NAME_REQUIRED);
    }
    let last_name = input.last_name.trim();
    if last_name.is_empty() {
        errors.insert(ProfileField::LastName, messages::LAST_NAME_REQUIRED);
    }

    let date_of_birth = parse_date_of_birth(&input.date_of_birth, today, &mut errors);

    let gender = Gender::from_option(&input.gender);
    if gender.is_none() {
        errors.insert(ProfileField::Gender, messages::GENDER_REQUIRED);
    }

    match (date_of_birth, gender) {
        (Some(date_of_birth), Some(gender)) if errors.is_empty() => Ok(Identity {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            date_of_birth,
            gender,
        }),
        _ => Err(errors),
    }
}

fn parse_date_of_birth(raw: &str, today: NaiveDate, errors: &mut FieldErrors) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(ProfileField::DateOfBirth, messages::DATE_OF_BIRTH_REQUIRED);
        return None;
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|date| (MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age_on(*date, today)));
    if date.is_none() {
        errors.insert(ProfileField::DateOfBirth, messages::DATE_OF_BIRTH_INVALID);
    }
    date
}

fn parse_body(input: &ProfileInput, units: UnitPreferences) -> Result<Body, FieldErrors> {
    let mut errors = FieldErrors::new();

    let weight = parse_measure(
        &input.weight,
        units.weight.range(),
        ProfileField::Weight,
        (messages::WEIGHT_REQUIRED, "weight", units.weight.as_str()),
        &mut errors,
    );
    let height = parse_measure(
        &input.height,
        units.height.range(),
        ProfileField::Height,
        (messages::HEIGHT_REQUIRED, "height", units.height.as_str()),
        &mut errors,
    );

    let fitness_goal = FitnessGoal::from_option(&input.fitness_goal);
    if fitness_goal.is_none() {
        errors.insert(ProfileField::FitnessGoal, messages::FITNESS_GOAL_REQUIRED);
    }

    match (weight, height, fitness_goal) {
        (Some(weight), Some(height), Some(fitness_goal)) => Ok(Body {
            weight: Weight {
                value: weight,
                unit: units.weight,
            },
            height: Height {
                value: height,
                unit: units.height,
            },
            fitness_goal,
        }),
        _ => Err(errors),
    }
}

/// Parse a numeric measurement and check it against an inclusive range
///
/// `copy` is (required message, measurement name, unit label).
fn parse_measure(
    raw: &str,
    (min, max): (f64, f64),
    field: ProfileField,
    copy: (&str, &str, &str),
    errors: &mut FieldErrors,
) -> Option<f64> {
    let (required, name, unit) = copy;
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(field, required);
        return None;
    }
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && (min..=max).contains(value));
    if value.is_none() {
        errors.insert(
            field,
            format!("Please enter a valid {name} ({min}-{max} {unit})"),
        );
    }
    value
}

/// Validate step one (names, date of birth, gender)
#[must_use]
pub fn validate_identity(input: &ProfileInput, today: NaiveDate) -> FieldErrors {
    parse_identity(input, today).err().unwrap_or_default()
}

/// Validate step two (weight, height, fitness goal)
#[must_use]
pub fn validate_body(input: &ProfileInput, units: UnitPreferences) -> FieldErrors {
    parse_body(input, units).err().unwrap_or_default()
}

/// Validate both steps and build the profile
///
/// # Errors
///
/// Returns every field error from both steps when any check fails.
pub fn validate_profile(
    input: &ProfileInput,
    units: UnitPreferences,
    today: NaiveDate,
) -> Result<Profile, FieldErrors> {
    match (parse_identity(input, today), parse_body(input, units)) {
        (Ok(identity), Ok(body)) => Ok(Profile {
            first_name: identity.first_name,
            last_name: identity.last_name,
            date_of_birth: identity.date_of_birth,
            gender: identity.gender,
            weight: body.weight,
            height: body.height,
            fitness_goal: body.fitness_goal,
        }),
        (identity, body) => {
            let mut errors = identity.err().unwrap_or_default();
            errors.extend(body.err().unwrap_or_default());
            Err(errors)
        }
    }
}

/// Onboarding form step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStep {
    /// Names, date of birth, gender
    Identity,
    /// Weight, height, fitness goal
    Body,
}

/// Stateful onboarding form
///
/// Mirrors what the user sees: current values, unit toggles, the active
/// step, and the messages currently displayed next to each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    input: ProfileInput,
    units: UnitPreferences,
    step: ProfileStep,
    errors: FieldErrors,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileForm {
    /// Empty form on step one with metric units
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: ProfileInput::default(),
            units: UnitPreferences::default(),
            step: ProfileStep::Identity,
            errors: FieldErrors::new(),
        }
    }

    /// Form pre-filled with values, e.g. from a saved draft
    #[must_use]
    pub fn with_input(input: ProfileInput, units: UnitPreferences) -> Self {
        Self {
            input,
            units,
            ..Self::new()
        }
    }

    /// Current raw values
    #[must_use]
    pub const fn input(&self) -> &ProfileInput {
        &self.input
    }

    /// Current unit selection
    #[must_use]
    pub const fn units(&self) -> UnitPreferences {
        self.units
    }

    /// Active step
    #[must_use]
    pub const fn step(&self) -> ProfileStep {
        self.step
    }

    /// Messages currently shown
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Update a field and clear its pending message
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        *self.input.field_mut(field) = value.into();
        self.errors.clear_field(field);
    }

    /// Switch kg/lbs and clear the weight value and its message
    pub fn toggle_weight_unit(&mut self) -> WeightUnit {
        self.units.weight = self.units.weight.toggled();
        self.input.weight.clear();
        self.errors.clear_field(ProfileField::Weight);
        self.units.weight
    }

    /// Switch cm/ft and clear the height value and its message
    pub fn toggle_height_unit(&mut self) -> HeightUnit {
        self.units.height = self.units.height.toggled();
        self.input.height.clear();
        self.errors.clear_field(ProfileField::Height);
        self.units.height
    }

    /// Validate the active step and advance when it passes
    ///
    /// Returns `true` when the form moved to step two.
    pub fn next(&mut self, today: NaiveDate) -> bool {
        if self.step != ProfileStep::Identity {
            return false;
        }
        self.errors = validate_identity(&self.input, today);
        if self.errors.is_empty() {
            self.step = ProfileStep::Body;
            debug!("profile form advanced to body step");
            true
        } else {
            debug!(error_count = self.errors.len(), "profile identity step rejected");
            false
        }
    }

    /// Return to step one and clear every message
    pub fn back(&mut self) {
        self.step = ProfileStep::Identity;
        self.errors.clear();
    }

    /// Validate step two, then the whole form, and produce the profile
    ///
    /// # Errors
    ///
    /// Returns the displayed messages when validation fails; they are also
    /// kept on the form.
    pub fn submit(&mut self, today: NaiveDate) -> Result<Profile, FieldErrors> {
        self.errors = validate_body(&self.input, self.units);
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        validate_profile(&self.input, self.units, today).map_err(|errors| {
            self.errors = errors.clone();
            errors
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn complete_input() -> ProfileInput {
        ProfileInput {
            first_name: " Ana ".to_owned(),
            last_name: "Silva".to_owned(),
            date_of_birth: "1990-01-20".to_owned(),
            gender: "female".to_owned(),
            weight: "62.5".to_owned(),
            height: "168".to_owned(),
            fitness_goal: "endurance".to_owned(),
        }
    }

    #[test]
    fn test_weight_bounds_are_inclusive_per_unit() {
        let kg = UnitPreferences::default();
        let lbs = UnitPreferences {
            weight: WeightUnit::Lbs,
            ..UnitPreferences::default()
        };
        let mut input = complete_input();
        for (value, units, accepted) in [
            ("20", kg, true),
            ("300", kg, true),
            ("19.9", kg, false),
            ("300.1", kg, false),
            ("44", lbs, true),
            ("660", lbs, true),
            ("43.9", lbs, false),
        ] {
            input.weight = value.to_owned();
            let errors = validate_body(&input, units);
            assert_eq!(!errors.contains(ProfileField::Weight), accepted, "{value}");
        }
    }

    #[test]
    fn test_age_window() {
        let mut input = complete_input();
        input.date_of_birth = "2011-06-16".to_owned();
        assert_eq!(
            validate_identity(&input, today()).get(ProfileField::DateOfBirth),
            Some(messages::DATE_OF_BIRTH_INVALID)
        );
        input.date_of_birth = "2011-06-15".to_owned();
        assert!(validate_identity(&input, today()).is_empty());
    }

    #[test]
    fn test_names_are_trimmed() {
        let profile =
            validate_profile(&complete_input(), UnitPreferences::default(), today()).unwrap();
        assert_eq!(profile.first_name, "Ana");
    }
}
