// ABOUTME: Account store commands for the fittracker CLI
// ABOUTME: Signs in through Supabase and shows the stored profile with the dashboard greeting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use fittracker::account::SupabaseAccountStore;
use fittracker::config::AppConfig;
use fittracker::context::AuthContext;
use fittracker::services::DashboardSummary;
use tracing::info;

use crate::helpers::display::{display_profile, print_json};

/// Sign in, print the profile row as JSON, and sign out again
pub async fn show_profile(email: &str, password: &str) -> Result<()> {
    let config = AppConfig::from_env()?;
    info!("{}", config.summary());

    let store = Arc::new(SupabaseAccountStore::new(config.supabase.clone()));
    let mut auth = AuthContext::initialize(store).await;
    auth.sign_in(email, password).await.context("sign-in failed")?;

    let state = auth.snapshot().await;
    if let Some(error) = &state.error {
        eprintln!("warning: {error}");
    }
    let summary = DashboardSummary::for_user(state.user.as_ref(), Utc::now().date_naive());
    display_profile(&summary, state.profile.as_ref());
    print_json(&state.profile)?;

    auth.sign_out().await.context("sign-out failed")?;
    auth.dispose();
    Ok(())
}
