// ABOUTME: Field-scoped validation errors for onboarding forms and the goal wizard
// ABOUTME: Provides FieldErrors map, WizardError transitions, and ProfileRowError decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::btree_map::{BTreeMap, Iter};
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AppError, ErrorCode};

/// Profile form fields that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    /// Given name
    FirstName,
    /// Family name
    LastName,
    /// Date of birth (ISO date)
    DateOfBirth,
    /// Gender option
    Gender,
    /// Body weight value
    Weight,
    /// Body height value
    Height,
    /// Primary fitness goal option
    FitnessGoal,
}

impl ProfileField {
    /// Stable field key used in serialized error maps
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::DateOfBirth => "date_of_birth",
            Self::Gender => "gender",
            Self::Weight => "weight",
            Self::Height => "height",
            Self::FitnessGoal => "fitness_goal",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed map of validation messages
///
/// An empty map means the validated step passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ProfileField, String>);

impl FieldErrors {
    /// Create an empty error map
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a message for a field, replacing any earlier message
    pub fn insert(&mut self, field: ProfileField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the message for a single field
    pub fn clear_field(&mut self, field: ProfileField) {
        self.0.remove(&field);
    }

    /// Drop every message
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Message for a field, if one is pending
    #[must_use]
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether the field currently has a message
    #[must_use]
    pub fn contains(&self, field: ProfileField) -> bool {
        self.0.contains_key(&field)
    }

    /// True when no field has a message
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate messages in field order
    pub fn iter(&self) -> Iter<'_, ProfileField, String> {
        self.0.iter()
    }

    /// Merge another map into this one
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a ProfileField, &'a String);
    type IntoIter = Iter<'a, ProfileField, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_default();
        Self::new(ErrorCode::InvalidInput, errors.to_string()).with_details(details)
    }
}

/// Errors raised by the goal intake wizard
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// A goal type must be chosen before leaving the first step
    #[error("Select a goal before continuing")]
    GoalTypeRequired,
    /// A detail needed for submission was never chosen
    #[error("Please select your {field} before generating a plan")]
    MissingSelection {
        /// Human-readable name of the missing detail
        field: &'static str,
    },
    /// The personal narrative would exceed its character limit
    #[error("Personal story is limited to {max} characters (got {length})")]
    NarrativeTooLong {
        /// Attempted length in characters
        length: usize,
        /// Maximum accepted length
        max: usize,
    },
    /// The action is not available from the current step
    #[error("Cannot {action} from the {step} step")]
    InvalidTransition {
        /// Step the wizard was in
        step: &'static str,
        /// Action that was attempted
        action: &'static str,
    },
    /// The wizard already exited or completed
    #[error("Goal setup is no longer active")]
    Inactive,
}

impl From<WizardError> for AppError {
    fn from(error: WizardError) -> Self {
        let code = match error {
            WizardError::GoalTypeRequired | WizardError::MissingSelection { .. } => {
                ErrorCode::MissingRequiredField
            }
            WizardError::NarrativeTooLong { .. } => ErrorCode::ValueOutOfRange,
            WizardError::InvalidTransition { .. } | WizardError::Inactive => {
                ErrorCode::InvalidInput
            }
        };
        Self::new(code, error.to_string())
    }
}

/// Errors decoding a persisted profile row into a typed profile
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileRowError {
    /// A column held a value outside its option catalog
    #[error("profiles.{column} holds unknown value '{value}'")]
    UnknownOption {
        /// Column name
        column: &'static str,
        /// Stored value
        value: String,
    },
    /// The stored date of birth is not an ISO date
    #[error("profiles.date_of_birth holds invalid date '{value}'")]
    InvalidDate {
        /// Stored value
        value: String,
    },
}

impl From<ProfileRowError> for AppError {
    fn from(error: ProfileRowError) -> Self {
        Self::new(ErrorCode::InvalidFormat, error.to_string())
    }
}
