// ABOUTME: Output formatting helpers for the fittracker CLI
// ABOUTME: Plans and records go to stdout as JSON; human summaries go to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use fittracker::models::{PlanResult, ProfileRow};
use fittracker::services::DashboardSummary;
use serde::Serialize;

/// Pretty-print `value` as JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Short plan outline on stderr
pub fn display_plan_outline(plan: &PlanResult) {
    eprintln!("\n{}", "=".repeat(60));
    eprintln!("{}", plan.plan_name.as_deref().unwrap_or("Untitled plan"));
    eprintln!("{}", "=".repeat(60));
    for entry in &plan.weekly_schedule {
        eprintln!(
            "  {:<10} {} ({})",
            entry.day.as_deref().unwrap_or("-"),
            entry.workout_type.as_deref().unwrap_or("-"),
            entry.duration.as_deref().unwrap_or("-"),
        );
    }
    eprintln!("  {} workouts", plan.workouts.len());
}

/// Dashboard greeting and stored profile on stderr
pub fn display_profile(summary: &DashboardSummary, row: Option<&ProfileRow>) {
    eprintln!("\n[{}] Welcome back, {}!", summary.initials, summary.display_name);
    eprintln!("{}", summary.date_label);
    match row {
        Some(row) => eprintln!(
            "Profile: {} {}, goal {}",
            row.first_name, row.last_name, row.fitness_goal
        ),
        None => eprintln!("No profile yet: onboarding has not been completed"),
    }
}
