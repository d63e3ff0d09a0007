// ABOUTME: Body-mass-index calculation and category classification
// ABOUTME: Half-open category intervals at 18.5, 25, and 30 kg/m²
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use fittracker_core::constants::units::CM_PER_METER;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the underweight band
const UNDERWEIGHT_BELOW: f64 = 18.5;
/// Upper bound (exclusive) of the normal band
const NORMAL_BELOW: f64 = 25.0;
/// Upper bound (exclusive) of the overweight band
const OVERWEIGHT_BELOW: f64 = 30.0;

/// Body-mass-index category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// BMI < 18.5
    Underweight,
    /// 18.5 <= BMI < 25
    NormalWeight,
    /// 25 <= BMI < 30
    Overweight,
    /// BMI >= 30
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            Self::Underweight
        } else if bmi < NORMAL_BELOW {
            Self::NormalWeight
        } else if bmi < OVERWEIGHT_BELOW {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Label used in prompts
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// BMI from metric weight and height: kg / m²
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / CM_PER_METER;
    weight_kg / (height_m * height_m)
}
