// ABOUTME: Profile validation bounds and validation messages
// ABOUTME: Inclusive weight/height ranges per unit and the accepted age window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Inclusive weight bounds in kilograms
pub const WEIGHT_KG_RANGE: (f64, f64) = (20.0, 300.0);
/// Inclusive weight bounds in pounds
pub const WEIGHT_LBS_RANGE: (f64, f64) = (44.0, 660.0);
/// Inclusive height bounds in centimeters
pub const HEIGHT_CM_RANGE: (f64, f64) = (100.0, 250.0);
/// Inclusive height bounds in feet
pub const HEIGHT_FT_RANGE: (f64, f64) = (3.0, 8.0);

/// Youngest accepted age in whole years
pub const MIN_AGE_YEARS: i32 = 13;
/// Oldest accepted age in whole years
pub const MAX_AGE_YEARS: i32 = 120;

/// Validation messages
pub mod messages {
    /// Empty first name
    pub const FIRST_NAME_REQUIRED: &str = "First name is required";
    /// Empty last name
    pub const LAST_NAME_REQUIRED: &str = "Last name is required";
    /// Empty date of birth
    pub const DATE_OF_BIRTH_REQUIRED: &str = "Date of birth is required";
    /// Unparseable date or age outside the accepted window
    pub const DATE_OF_BIRTH_INVALID: &str = "Please enter a valid date of birth";
    /// Gender still on the placeholder
    pub const GENDER_REQUIRED: &str = "Please select your gender";
    /// Empty weight
    pub const WEIGHT_REQUIRED: &str = "Weight is required";
    /// Empty height
    pub const HEIGHT_REQUIRED: &str = "Height is required";
    /// Fitness goal still on the placeholder
    pub const FITNESS_GOAL_REQUIRED: &str = "Please select your fitness goal";
}
