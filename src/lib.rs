// ABOUTME: Main library entry point for the FitTracker goal intake and plan pipeline
// ABOUTME: Wires the account store, auth context, plan generator, and domain services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FitTracker`
//!
//! Client core for onboarding, goal intake, and AI workout plan drafting.
//!
//! ## Architecture
//!
//! - **Intelligence** (`fittracker-intelligence`): profile validation, the goal
//!   wizard, prompt compilation, and plan parsing. Pure and synchronous.
//! - **Account store**: sessions and the `profiles` table on Supabase
//! - **LLM**: the Gemini plan generator behind `LlmProvider`
//! - **Context**: explicitly constructed session/profile state
//! - **Services**: the plan generation pipeline and dashboard values
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fittracker::account::SupabaseAccountStore;
//! use fittracker::config::AppConfig;
//! use fittracker::context::AuthContext;
//! use fittracker::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let store = Arc::new(SupabaseAccountStore::new(config.supabase.clone()));
//!     let auth = AuthContext::initialize(store).await;
//!     println!("signed in: {}", auth.snapshot().await.user.is_some());
//!     Ok(())
//! }
//! ```

/// Account store contract and Supabase client
pub mod account;

/// Environment configuration
pub mod config;

/// Application constants and environment variable names
pub mod constants;

/// Session and profile context
pub mod context;

/// Unified error handling with standard error codes
pub mod errors;

/// Plan generator abstraction and Gemini client
pub mod llm;

/// Structured logging setup and domain events
pub mod logging;

/// Plan generation and dashboard services
pub mod services;

/// Shared data models
pub use fittracker_core::models;

/// Validation, wizard, prompt, and parser logic
pub use fittracker_intelligence as intelligence;
