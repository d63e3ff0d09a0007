// ABOUTME: Dashboard header values derived from the signed-in identity
// ABOUTME: Display name from the email local part, initials, and the formatted date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::User;

/// Name shown when the identity has no usable email
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// Values for the dashboard greeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Email local part, or "User"
    pub display_name: String,
    /// Uppercased first letter of each word of the display name
    pub initials: String,
    /// e.g. "Monday, October 19, 2026"
    pub date_label: String,
}

impl DashboardSummary {
    /// Build the summary for `user` on `today`
    #[must_use]
    pub fn for_user(user: Option<&User>, today: NaiveDate) -> Self {
        let display_name = display_name(user);
        Self {
            initials: initials(&display_name),
            date_label: today.format("%A, %B %-d, %Y").to_string(),
            display_name,
        }
    }
}

/// Email local part of `user`, or the fallback name
#[must_use]
pub fn display_name(user: Option<&User>) -> String {
    user.and_then(|u| u.email.as_deref())
        .and_then(|email| email.split('@').next())
        .filter(|local| !local.is_empty())
        .unwrap_or(FALLBACK_DISPLAY_NAME)
        .to_owned()
}

/// First letter of each space-separated word, uppercased
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
