// ABOUTME: Account store records: identities, sessions, auth notifications, and profile rows
// ABOUTME: ProfileRow mirrors the persisted `profiles` table and converts to a typed Profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::{FitnessGoal, Gender, Height, HeightUnit, Profile, Weight, WeightUnit};
use crate::errors::ProfileRowError;

/// Authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity id, also the profile row key
    pub id: Uuid,
    /// Email address, when the identity has one
    #[serde(default)]
    pub email: Option<String>,
}

/// Active session issued by the account store
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for authenticated requests
    pub access_token: String,
    /// Token used to renew the session
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Expiry of `access_token`
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Identity the session belongs to
    pub user: User,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Kind of session change reported by the account store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    /// Session restored at startup
    InitialSession,
    /// Identity signed in
    SignedIn,
    /// Identity signed out
    SignedOut,
    /// Access token renewed
    TokenRefreshed,
    /// Identity attributes changed
    UserUpdated,
}

/// Session-change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStateChange {
    /// What happened
    pub event: AuthEvent,
    /// Session after the change; `None` when signed out
    pub session: Option<Session>,
}

/// Federated identity providers offered at sign-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    /// Google accounts
    Google,
}

impl OAuthProvider {
    /// Provider id understood by the account store
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

/// Row of the persisted `profiles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Owning identity id
    pub id: Uuid,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// ISO `YYYY-MM-DD`
    pub date_of_birth: String,
    /// Gender option id
    pub gender: String,
    /// Weight in `weight_unit`
    pub weight: f64,
    /// Height in `height_unit`
    pub height: f64,
    /// Fitness goal option id
    pub fitness_goal: String,
    /// `kg` or `lbs`
    pub weight_unit: String,
    /// `cm` or `ft`
    pub height_unit: String,
    /// Set by the store on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Set on every update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileRow {
    /// Build the row to upsert for `profile`, stamping `updated_at`
    #[must_use]
    pub fn from_profile(id: Uuid, profile: &Profile, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            date_of_birth: profile.date_of_birth.format("%Y-%m-%d").to_string(),
            gender: profile.gender.as_str().to_owned(),
            weight: profile.weight.value,
            height: profile.height.value,
            fitness_goal: profile.fitness_goal.as_str().to_owned(),
            weight_unit: profile.weight.unit.as_str().to_owned(),
            height_unit: profile.height.unit.as_str().to_owned(),
            created_at: None,
            updated_at: Some(now),
        }
    }

    /// Decode the stored values into a typed profile
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRowError`] when a stored option or date is not recognized.
    pub fn to_profile(&self) -> Result<Profile, ProfileRowError> {
        let date_of_birth = NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d")
            .map_err(|_| ProfileRowError::InvalidDate {
                value: self.date_of_birth.clone(),
            })?;
        let gender = Gender::from_option(&self.gender)
            .ok_or_else(|| unknown("gender", &self.gender))?;
        let fitness_goal = FitnessGoal::from_option(&self.fitness_goal)
            .ok_or_else(|| unknown("fitness_goal", &self.fitness_goal))?;
        let weight_unit = WeightUnit::from_option(&self.weight_unit)
            .ok_or_else(|| unknown("weight_unit", &self.weight_unit))?;
        let height_unit = HeightUnit::from_option(&self.height_unit)
            .ok_or_else(|| unknown("height_unit", &self.height_unit))?;

        Ok(Profile {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth,
            gender,
            weight: Weight {
                value: self.weight,
                unit: weight_unit,
            },
            height: Height {
                value: self.height,
                unit: height_unit,
            },
            fitness_goal,
        })
    }
}

fn unknown(column: &'static str, value: &str) -> ProfileRowError {
    ProfileRowError::UnknownOption {
        column,
        value: value.to_owned(),
    }
}
