// ABOUTME: FitTracker CLI - drives the goal intake and plan generation pipeline headlessly
// ABOUTME: Compiles prompts, generates plans, parses saved replies, and shows stored profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Print the prompt that would be sent for a profile and goal answers
//! fittracker prompt --profile profile.json --goal goal.json
//!
//! # Generate a plan with Gemini (needs GEMINI_API_KEY)
//! fittracker generate --profile profile.json --goal goal.json
//!
//! # Parse a saved model reply
//! fittracker parse reply.txt
//!
//! # Sign in and show the stored profile
//! fittracker profile --email ana@example.com --password secret
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fittracker::logging::LoggingConfig;
use tracing::debug;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "fittracker",
    about = "FitTracker goal intake and plan pipeline",
    long_about = "Validate onboarding answers, compile plan prompts, generate plans with Gemini, and inspect stored profiles."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the compiled plan prompt
    Prompt {
        /// Onboarding answers (JSON)
        #[arg(long)]
        profile: PathBuf,

        /// Goal wizard answers (JSON)
        #[arg(long)]
        goal: PathBuf,
    },

    /// Run the full pipeline against the plan generator
    Generate {
        /// Onboarding answers (JSON)
        #[arg(long)]
        profile: PathBuf,

        /// Goal wizard answers (JSON)
        #[arg(long)]
        goal: PathBuf,

        /// Identity recorded on the goal record (random when omitted)
        #[arg(long)]
        user_id: Option<Uuid>,
    },

    /// Parse a saved model reply into a plan
    Parse {
        /// File holding the raw model text
        file: PathBuf,
    },

    /// Sign in and show the stored profile
    Profile {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose { logging.verbose() } else { logging };
    logging.init()?;
    debug!("FitTracker CLI");

    match cli.command {
        Command::Prompt { profile, goal } => commands::plan::prompt(&profile, &goal)?,
        Command::Generate {
            profile,
            goal,
            user_id,
        } => commands::plan::generate(&profile, &goal, user_id).await?,
        Command::Parse { file } => commands::plan::parse(&file)?,
        Command::Profile { email, password } => {
            commands::account::show_profile(&email, &password).await?;
        }
    }

    Ok(())
}
