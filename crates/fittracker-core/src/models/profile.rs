// ABOUTME: Validated user profile with unit-aware body measurements
// ABOUTME: Gender and fitness goal option catalogs plus metric normalization helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::profile::{
    HEIGHT_CM_RANGE, HEIGHT_FT_RANGE, WEIGHT_KG_RANGE, WEIGHT_LBS_RANGE,
};
use crate::constants::units::{CM_PER_FOOT, KG_PER_LB};

/// Unit the user enters body weight in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Kilograms
    #[default]
    Kg,
    /// Pounds
    Lbs,
}

impl WeightUnit {
    /// Stored/serialized name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lbs => "lbs",
        }
    }

    /// Inclusive accepted range in this unit
    #[must_use]
    pub const fn range(self) -> (f64, f64) {
        match self {
            Self::Kg => WEIGHT_KG_RANGE,
            Self::Lbs => WEIGHT_LBS_RANGE,
        }
    }

    /// The other unit
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Kg => Self::Lbs,
            Self::Lbs => Self::Kg,
        }
    }

    /// Parse a stored unit name
    #[must_use]
    pub fn from_option(value: &str) -> Option<Self> {
        [Self::Kg, Self::Lbs]
            .into_iter()
            .find(|unit| unit.as_str() == value)
    }
}

/// Unit the user enters body height in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    /// Centimeters
    #[default]
    Cm,
    /// Feet (decimal)
    Ft,
}

impl HeightUnit {
    /// Stored/serialized name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cm => "cm",
            Self::Ft => "ft",
        }
    }

    /// Inclusive accepted range in this unit
    #[must_use]
    pub const fn range(self) -> (f64, f64) {
        match self {
            Self::Cm => HEIGHT_CM_RANGE,
            Self::Ft => HEIGHT_FT_RANGE,
        }
    }

    /// The other unit
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Cm => Self::Ft,
            Self::Ft => Self::Cm,
        }
    }

    /// Parse a stored unit name
    #[must_use]
    pub fn from_option(value: &str) -> Option<Self> {
        [Self::Cm, Self::Ft]
            .into_iter()
            .find(|unit| unit.as_str() == value)
    }
}

/// Units chosen on the onboarding form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitPreferences {
    /// Weight unit
    pub weight: WeightUnit,
    /// Height unit
    pub height: HeightUnit,
}

/// Gender options offered at onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other
    Other,
    /// Prefer not to say
    PreferNotToSay,
}

impl Gender {
    /// Every option in display order
    pub const ALL: [Self; 4] = [Self::Male, Self::Female, Self::Other, Self::PreferNotToSay];

    /// Stored/serialized name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::PreferNotToSay => "prefer-not-to-say",
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }

    /// Parse a stored option; the empty placeholder yields `None`
    #[must_use]
    pub fn from_option(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|gender| gender.as_str() == value)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary fitness goal chosen at onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessGoal {
    /// Lose weight
    WeightLoss,
    /// Build muscle
    MuscleGain,
    /// Improve endurance
    Endurance,
    /// Stay generally fit
    GeneralFitness,
}

impl FitnessGoal {
    /// Every option in display order
    pub const ALL: [Self; 4] = [
        Self::WeightLoss,
        Self::MuscleGain,
        Self::Endurance,
        Self::GeneralFitness,
    ];

    /// Stored/serialized name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightLoss => "weight-loss",
            Self::MuscleGain => "muscle-gain",
            Self::Endurance => "endurance",
            Self::GeneralFitness => "general-fitness",
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WeightLoss => "Weight Loss",
            Self::MuscleGain => "Muscle Gain",
            Self::Endurance => "Endurance",
            Self::GeneralFitness => "General Fitness",
        }
    }

    /// Parse a stored option; the empty placeholder yields `None`
    #[must_use]
    pub fn from_option(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|goal| goal.as_str() == value)
    }
}

/// Body weight as entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    /// Numeric value in `unit`
    pub value: f64,
    /// Unit of `value`
    pub unit: WeightUnit,
}

impl Weight {
    /// Value converted to kilograms
    #[must_use]
    pub fn kilograms(self) -> f64 {
        match self.unit {
            WeightUnit::Kg => self.value,
            WeightUnit::Lbs => self.value * KG_PER_LB,
        }
    }
}

/// Body height as entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Height {
    /// Numeric value in `unit`
    pub value: f64,
    /// Unit of `value`
    pub unit: HeightUnit,
}

impl Height {
    /// Value converted to centimeters
    #[must_use]
    pub fn centimeters(self) -> f64 {
        match self.unit {
            HeightUnit::Cm => self.value,
            HeightUnit::Ft => self.value * CM_PER_FOOT,
        }
    }
}

/// Validated onboarding profile owned by one identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Given name (trimmed, non-empty)
    pub first_name: String,
    /// Family name (trimmed, non-empty)
    pub last_name: String,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    /// Gender
    pub gender: Gender,
    /// Body weight
    pub weight: Weight,
    /// Body height
    pub height: Height,
    /// Primary fitness goal
    pub fitness_goal: FitnessGoal,
}

impl Profile {
    /// Body weight in kilograms regardless of entry unit
    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        self.weight.kilograms()
    }

    /// Body height in centimeters regardless of entry unit
    #[must_use]
    pub fn height_cm(&self) -> f64 {
        self.height.centimeters()
    }

    /// Full display name
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
