// ABOUTME: Plan generation pipeline from a finalized goal to a validated workout plan
// ABOUTME: Runs prompt compile, generator call, parse, and schema check with a re-submit guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Generation Service
//!
//! One submission runs strictly in order:
//!
//! 1. finalize the wizard draft into a `GoalSubmission`
//! 2. compile the prompt from the profile and submission
//! 3. send it to the plan generator
//! 4. extract the plan JSON from the reply
//! 5. check the plan has the content callers rely on
//!
//! Any failure leaves the wizard on its review step so the user can retry.
//! While a submission is in flight further submissions are rejected.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::GeminiConfig;
use crate::constants::env_vars::GEMINI_API_KEY;
use crate::context::AuthContext;
use crate::errors::{AppError, ErrorCode, PlanGenerationError};
use crate::intelligence::{compile_prompt, parse_plan_response, GoalWizard};
use crate::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
use crate::logging::AppLogger;
use crate::models::{GoalRecord, GoalSubmission, PlanResult, Profile};

/// Clears the in-flight flag when a submission ends, however it ends
struct SubmissionGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Turns a finalized goal into a validated plan through the plan generator
pub struct PlanGenerationService {
    provider: Option<Arc<dyn LlmProvider>>,
    model: Option<String>,
    submitting: AtomicBool,
}

impl PlanGenerationService {
    /// Service backed by `provider`, using its default model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
            model: None,
            submitting: AtomicBool::new(false),
        }
    }

    /// Service with no generator; every submission fails as not configured
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self {
            provider: None,
            model: None,
            submitting: AtomicBool::new(false),
        }
    }

    /// Service backed by Gemini when an API key is configured
    #[must_use]
    pub fn from_config(config: &GeminiConfig) -> Self {
        match GeminiProvider::from_config(config) {
            Ok(provider) => Self::new(Arc::new(provider)),
            Err(error) => {
                warn!(error = %error, "plan generation disabled");
                Self::unconfigured()
            }
        }
    }

    /// Override the provider's default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Whether a generator is available
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Whether a submission is in flight
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<SubmissionGuard<'_>, PlanGenerationError> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PlanGenerationError::AlreadySubmitting)?;
        Ok(SubmissionGuard {
            flag: &self.submitting,
        })
    }

    /// Generate a plan for the signed-in user of `auth`
    ///
    /// # Errors
    ///
    /// [`PlanGenerationError::MissingProfile`] when nobody is signed in or the
    /// stored profile is absent, otherwise as [`Self::generate`].
    pub async fn generate_for(
        &self,
        auth: &AuthContext,
        wizard: &mut GoalWizard,
    ) -> Result<GoalRecord, PlanGenerationError> {
        let user_id = auth
            .snapshot()
            .await
            .user_id()
            .ok_or(PlanGenerationError::MissingProfile)?;
        let profile = auth
            .profile()
            .await
            .ok_or(PlanGenerationError::MissingProfile)?;
        self.generate(user_id, &profile, wizard, Utc::now().date_naive())
            .await
    }

    /// Run the pipeline for `wizard`, which must be on its review step
    ///
    /// On success the wizard is marked completed and the record to persist is
    /// returned.
    ///
    /// # Errors
    ///
    /// Any [`PlanGenerationError`]; the wizard stays on review.
    #[instrument(skip(self, profile, wizard), fields(user_id = %user_id))]
    pub async fn generate(
        &self,
        user_id: Uuid,
        profile: &Profile,
        wizard: &mut GoalWizard,
        today: NaiveDate,
    ) -> Result<GoalRecord, PlanGenerationError> {
        let _guard = self.begin()?;
        let started = Instant::now();

        let result = self.run(profile, wizard, today).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let model = self.model_name();

        match result {
            Ok((goal, workout_plan)) => {
                wizard.complete()?;
                AppLogger::log_plan_generation(user_id, &model, true, duration_ms, None);
                let record = GoalRecord {
                    user_id,
                    goal,
                    workout_plan,
                    created_at: Utc::now(),
                };
                info!(
                    user_id = %record.user_id,
                    goal_type = %record.goal.goal_type,
                    plan_name = record.workout_plan.plan_name.as_deref().unwrap_or_default(),
                    "goal record ready to persist"
                );
                Ok(record)
            }
            Err(error) => {
                let failure = error.to_string();
                AppLogger::log_plan_generation(user_id, &model, false, duration_ms, Some(&failure));
                Err(error)
            }
        }
    }

    async fn run(
        &self,
        profile: &Profile,
        wizard: &GoalWizard,
        today: NaiveDate,
    ) -> Result<(GoalSubmission, PlanResult), PlanGenerationError> {
        let goal = wizard.finalize()?;
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| PlanGenerationError::NotConfigured {
                message: AppError::config_missing(GEMINI_API_KEY).message,
            })?;

        let prompt = compile_prompt(profile, &goal, today);
        let mut request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }

        let response = provider.complete(&request).await.map_err(classify)?;
        let plan = parse_plan_response(&response.content)?;
        plan.validate()?;
        Ok((goal, plan))
    }

    fn model_name(&self) -> String {
        match (&self.model, &self.provider) {
            (Some(model), _) => model.clone(),
            (None, Some(provider)) => provider.default_model().to_owned(),
            (None, None) => "unconfigured".to_owned(),
        }
    }
}

impl Debug for PlanGenerationService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PlanGenerationService")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("model", &self.model)
            .field("submitting", &self.is_submitting())
            .finish()
    }
}

/// Map a generator error onto the pipeline's failure kinds
fn classify(error: AppError) -> PlanGenerationError {
    match error.code {
        ErrorCode::ExternalRateLimited => PlanGenerationError::RateLimited {
            message: error.message,
        },
        ErrorCode::ExternalServiceUnavailable => PlanGenerationError::Network {
            message: error.message,
        },
        ErrorCode::ConfigError | ErrorCode::ConfigMissing | ErrorCode::ConfigInvalid => {
            PlanGenerationError::NotConfigured {
                message: error.message,
            }
        }
        _ => PlanGenerationError::Api {
            status: error
                .context
                .details
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|status| u16::try_from(status).ok())
                .unwrap_or_default(),
            message: error.message,
        },
    }
}
