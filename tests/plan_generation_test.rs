// ABOUTME: Integration tests for the plan generation pipeline with a scripted generator
// ABOUTME: Covers success, every failure kind, retry from review, and the re-submission guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::{
    chatty_reply, init_test_logging, sample_profile, sample_submission, session_for, today,
    wizard_on_review, VALID_PLAN_JSON,
};
use fittracker::constants::plan::PLAN_FAILURE_MESSAGE;
use fittracker::context::AuthContext;
use fittracker::errors::{ErrorCode, PlanGenerationError, PlanParseError, WizardError};
use fittracker::intelligence::{compile_prompt, GoalWizard, WizardState, WizardStep};
use fittracker::llm::MessageRole;
use fittracker::models::{GoalRecord, GoalType, ProfileRow};
use fittracker::services::PlanGenerationService;
use helpers::fake_account_store::FakeAccountStore;
use helpers::scripted_provider::{Scripted, ScriptedProvider};
use uuid::Uuid;

fn service_with(provider: &Arc<ScriptedProvider>) -> PlanGenerationService {
    PlanGenerationService::new(provider.clone())
}

async fn generate_once(
    service: &PlanGenerationService,
    wizard: &mut GoalWizard,
) -> Result<GoalRecord, PlanGenerationError> {
    service
        .generate(Uuid::new_v4(), &sample_profile(), wizard, today())
        .await
}

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_success_completes_wizard_and_returns_record() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::replying(chatty_reply()));
    let service = service_with(&provider);
    let mut wizard = wizard_on_review();
    let user_id = Uuid::new_v4();

    let record = service
        .generate(user_id, &sample_profile(), &mut wizard, today())
        .await
        .unwrap();

    assert_eq!(record.user_id, user_id);
    assert_eq!(record.goal, sample_submission());
    assert_eq!(
        record.workout_plan.plan_name.as_deref(),
        Some("Sunrise Trail Builder")
    );
    assert_eq!(wizard.state(), WizardState::Completed);
    assert!(!service.is_submitting());
}

#[tokio::test]
async fn test_generator_receives_compiled_prompt() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::replying(VALID_PLAN_JSON));
    let service = service_with(&provider);
    let mut wizard = wizard_on_review();

    generate_once(&service, &mut wizard).await.unwrap();

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let messages = &requests[0].messages;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(
        messages[0].content,
        compile_prompt(&sample_profile(), &sample_submission(), today())
    );
    assert_eq!(requests[0].model, None);
}

#[tokio::test]
async fn test_model_override_is_sent() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::replying(VALID_PLAN_JSON));
    let service = service_with(&provider).with_model("gemini-1.5-pro");
    let mut wizard = wizard_on_review();

    generate_once(&service, &mut wizard).await.unwrap();

    assert_eq!(
        provider.requests()[0].model.as_deref(),
        Some("gemini-1.5-pro")
    );
}

#[tokio::test]
async fn test_completed_wizard_cannot_generate_again() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::replying(VALID_PLAN_JSON));
    let service = service_with(&provider);
    let mut wizard = wizard_on_review();
    generate_once(&service, &mut wizard).await.unwrap();

    let error = generate_once(&service, &mut wizard).await.unwrap_err();

    assert_eq!(error, PlanGenerationError::Incomplete(WizardError::Inactive));
    assert_eq!(provider.calls(), 1);
}

// ============================================================================
// Failures stay on review
// ============================================================================

#[tokio::test]
async fn test_unconfigured_generator() {
    init_test_logging();
    let service = PlanGenerationService::unconfigured();
    let mut wizard = wizard_on_review();

    let error = generate_once(&service, &mut wizard).await.unwrap_err();

    assert!(!service.is_configured());
    match &error {
        PlanGenerationError::NotConfigured { message } => {
            assert!(message.contains("GEMINI_API_KEY"));
        }
        other => panic!("expected NotConfigured, got {other:?}"),
    }
    assert_eq!(error.code(), ErrorCode::ConfigMissing);
    assert_eq!(error.user_message(), PLAN_FAILURE_MESSAGE);
    assert_eq!(wizard.step(), Some(WizardStep::Review));
}

#[tokio::test]
async fn test_reply_without_json_then_retry_succeeds() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::with_outcomes(vec![
        Scripted::Reply("I could not build a plan right now.".to_owned()),
        Scripted::Reply(chatty_reply()),
    ]));
    let service = service_with(&provider);
    let mut wizard = wizard_on_review();

    let error = generate_once(&service, &mut wizard).await.unwrap_err();
    assert_eq!(error, PlanGenerationError::Parse(PlanParseError::NoJsonFound));
    assert_eq!(wizard.step(), Some(WizardStep::Review));

    generate_once(&service, &mut wizard).await.unwrap();
    assert_eq!(wizard.state(), WizardState::Completed);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_plan_missing_content_fails_schema_check() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::replying(
        "{\"plan_name\": \"Thin\", \"weekly_schedule\": [], \"workouts\": []}",
    ));
    let service = service_with(&provider);
    let mut wizard = wizard_on_review();

    let error = generate_once(&service, &mut wizard).await.unwrap_err();

    match error {
        PlanGenerationError::Schema(schema) => {
            assert_eq!(schema.violations, vec!["weekly_schedule", "workouts"]);
        }
        other => panic!("expected Schema, got {other:?}"),
    }
    assert_eq!(wizard.step(), Some(WizardStep::Review));
}

#[tokio::test]
async fn test_generator_errors_are_classified() {
    init_test_logging();
    let cases = [
        (Scripted::status(503, "model overloaded"), ErrorCode::ExternalServiceError),
        (Scripted::status(429, "retry in 7 seconds"), ErrorCode::ExternalRateLimited),
        (Scripted::unreachable(), ErrorCode::ExternalServiceUnavailable),
    ];

    for (failure, expected_code) in cases {
        let provider = Arc::new(ScriptedProvider::failing(failure));
        let service = service_with(&provider);
        let mut wizard = wizard_on_review();

        let error = generate_once(&service, &mut wizard).await.unwrap_err();

        assert_eq!(error.code(), expected_code, "{error:?}");
        assert_eq!(error.user_message(), PLAN_FAILURE_MESSAGE);
        assert_eq!(wizard.step(), Some(WizardStep::Review));
    }
}

#[tokio::test]
async fn test_api_error_keeps_status() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::failing(Scripted::status(
        500,
        "internal error",
    )));
    let service = service_with(&provider);
    let mut wizard = wizard_on_review();

    let error = generate_once(&service, &mut wizard).await.unwrap_err();

    assert_eq!(
        error,
        PlanGenerationError::Api {
            status: 500,
            message: "internal error".to_owned()
        }
    );
}

#[tokio::test]
async fn test_incomplete_goal_never_reaches_generator() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::replying(VALID_PLAN_JSON));
    let service = service_with(&provider);
    let mut wizard = GoalWizard::new();
    wizard.select_goal(GoalType::LoseWeight).unwrap();
    wizard.next().unwrap();
    wizard.next().unwrap();

    let error = generate_once(&service, &mut wizard).await.unwrap_err();

    assert_eq!(
        error,
        PlanGenerationError::Incomplete(WizardError::MissingSelection { field: "timeline" })
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_wizard_not_on_review_is_rejected() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::replying(VALID_PLAN_JSON));
    let service = service_with(&provider);
    let mut wizard = GoalWizard::new();

    let error = generate_once(&service, &mut wizard).await.unwrap_err();

    assert!(matches!(
        error,
        PlanGenerationError::Incomplete(WizardError::InvalidTransition { .. })
    ));
    assert_eq!(provider.calls(), 0);
}

// ============================================================================
// Re-submission guard
// ============================================================================

#[tokio::test]
async fn test_second_submission_while_in_flight_is_rejected() {
    init_test_logging();
    let provider = Arc::new(
        ScriptedProvider::replying(VALID_PLAN_JSON).with_delay(Duration::from_millis(50)),
    );
    let service = service_with(&provider);
    let mut first_wizard = wizard_on_review();
    let mut second_wizard = wizard_on_review();

    let (first, second) = tokio::join!(
        generate_once(&service, &mut first_wizard),
        generate_once(&service, &mut second_wizard),
    );

    assert!(first.is_ok());
    assert_eq!(second.unwrap_err(), PlanGenerationError::AlreadySubmitting);
    assert_eq!(provider.calls(), 1);
    assert_eq!(first_wizard.state(), WizardState::Completed);
    assert_eq!(second_wizard.step(), Some(WizardStep::Review));
    assert!(!service.is_submitting());
}

#[tokio::test]
async fn test_guard_released_after_failure() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::with_outcomes(vec![
        Scripted::unreachable(),
        Scripted::Reply(VALID_PLAN_JSON.to_owned()),
    ]));
    let service = service_with(&provider);
    let mut wizard = wizard_on_review();

    assert!(generate_once(&service, &mut wizard).await.is_err());
    assert!(!service.is_submitting());
    assert!(generate_once(&service, &mut wizard).await.is_ok());
}

// ============================================================================
// Signed-in user
// ============================================================================

#[tokio::test]
async fn test_generate_for_requires_profile() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::replying(VALID_PLAN_JSON));
    let service = service_with(&provider);
    let store = FakeAccountStore::new().with_session(session_for("new@example.com"));
    let auth = AuthContext::initialize(Arc::new(store)).await;
    let mut wizard = wizard_on_review();

    let error = service.generate_for(&auth, &mut wizard).await.unwrap_err();

    assert_eq!(error, PlanGenerationError::MissingProfile);
    assert_eq!(error.to_string(), "User profile not found");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_generate_for_signed_in_user() {
    init_test_logging();
    let provider = Arc::new(ScriptedProvider::replying(VALID_PLAN_JSON));
    let service = service_with(&provider);
    let session = session_for("ana@example.com");
    let store = FakeAccountStore::new().with_session(session.clone());
    store.insert_profile(ProfileRow::from_profile(
        session.user.id,
        &sample_profile(),
        Utc::now(),
    ));
    let auth = AuthContext::initialize(Arc::new(store)).await;
    let mut wizard = wizard_on_review();

    let record = service.generate_for(&auth, &mut wizard).await.unwrap();

    assert_eq!(record.user_id, session.user.id);
    assert_eq!(wizard.state(), WizardState::Completed);
}
