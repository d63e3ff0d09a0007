// ABOUTME: Plan pipeline commands for the fittracker CLI
// ABOUTME: Prompt preview, full generation against Gemini, and saved-reply parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use fittracker::config::AppConfig;
use fittracker::intelligence::{compile_prompt, parse_plan_response};
use fittracker::services::PlanGenerationService;
use tracing::info;
use uuid::Uuid;

use crate::helpers::display::{display_plan_outline, print_json};
use crate::helpers::input::{load_goal, load_profile};

/// Print the prompt for the given answers
pub fn prompt(profile_path: &Path, goal_path: &Path) -> Result<()> {
    let today = Utc::now().date_naive();
    let profile = load_profile(profile_path, today)?;
    let wizard = load_goal(goal_path)?;
    let goal = wizard.finalize()?;
    println!("{}", compile_prompt(&profile, &goal, today));
    Ok(())
}

/// Generate a plan and print the goal record
pub async fn generate(profile_path: &Path, goal_path: &Path, user_id: Option<Uuid>) -> Result<()> {
    let today = Utc::now().date_naive();
    let profile = load_profile(profile_path, today)?;
    let mut wizard = load_goal(goal_path)?;

    let config = AppConfig::from_env()?;
    info!("{}", config.summary());
    let service = PlanGenerationService::from_config(&config.gemini);

    let user_id = user_id.unwrap_or_else(Uuid::new_v4);
    match service.generate(user_id, &profile, &mut wizard, today).await {
        Ok(record) => {
            display_plan_outline(&record.workout_plan);
            print_json(&record)
        }
        Err(error) => {
            eprintln!("{}", error.user_message());
            Err(error).context("plan generation failed")
        }
    }
}

/// Parse a saved model reply and print the plan
pub fn parse(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let plan = parse_plan_response(&text)?;
    if let Err(violations) = plan.validate() {
        eprintln!("warning: {violations}");
    }
    display_plan_outline(&plan);
    print_json(&plan)
}
