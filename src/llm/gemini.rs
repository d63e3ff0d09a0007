// ABOUTME: Google Gemini plan generator client over the Generative Language API
// ABOUTME: Sends the compiled plan prompt and returns the raw model text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set `GEMINI_API_KEY` with a Google AI Studio key. `GEMINI_MODEL` overrides
//! the default `gemini-1.5-flash`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fittracker::config::AppConfig;
//! use fittracker::errors::AppError;
//! use fittracker::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = AppConfig::from_env()?;
//!     let provider = GeminiProvider::from_config(&config.gemini)?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("Build a 4 week plan")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, instrument};

use super::{ChatRequest, ChatResponse, LlmProvider};
use crate::config::GeminiConfig;
use crate::constants::env_vars::GEMINI_API_KEY;
use crate::constants::plan::DEFAULT_PLAN_MODEL;
use crate::constants::service_names;
use crate::errors::{generator_transport_error, AppError, ErrorCode};

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini plan generator
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            default_model: DEFAULT_PLAN_MODEL.to_owned(),
        }
    }

    /// Create a provider from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_MISSING` if the configuration carries no API key.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config_missing(GEMINI_API_KEY))?;
        Ok(Self::new(api_key).with_default_model(config.model.clone()))
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{API_BASE_URL}/models/{model}:{method}?key={}", self.api_key)
    }

    /// Every message becomes a user turn
    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|message| GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![ContentPart {
                    text: Some(message.content.clone()),
                }],
            })
            .collect();
        GeminiRequest { contents }
    }

    /// Concatenate the text parts of the first candidate
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        let parts = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default();

        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            return Err(AppError::external_service(
                service_names::GEMINI,
                "No content in Gemini response",
            ));
        }
        Ok(text)
    }

    /// Map a non-success status to an application error carrying the status
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        let error = match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Gemini rejected the API key ({status}): {message}"),
            ),
            _ => AppError::new(
                ErrorCode::ExternalServiceError,
                format!("Gemini API error ({status}): {message}"),
            ),
        };
        error.with_details(json!({ "status": status }))
    }

    /// Turn "Please retry in 6.4s." into a whole-second hint
    fn extract_quota_message(message: &str) -> String {
        const PREFIX: &str = "Please retry in ";
        if let Some(retry_pos) = message.find(PREFIX) {
            let after_prefix = &message[retry_pos + PREFIX.len()..];
            if let Some(s_pos) = after_prefix.find('s') {
                if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(DEFAULT_PLAN_MODEL)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");
        let gemini_request = Self::build_gemini_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| generator_transport_error(service_names::GEMINI, &e))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| generator_transport_error(service_names::GEMINI, &e))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response envelope");
                AppError::external_service(
                    service_names::GEMINI,
                    format!("Failed to parse Gemini response: {e}"),
                )
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service(
                service_names::GEMINI,
                error.message,
            ));
        }

        let content = Self::extract_content(&gemini_response)?;

        debug!(chars = content.len(), "Received Gemini response");

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    #[test]
    fn test_prompt_becomes_single_user_turn() {
        let request = ChatRequest::new(vec![ChatMessage::user("Plan please")]);

        let body = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();

        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan please");
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_extract_content_joins_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"plan"},{"text":"Name\":1}"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(
            GeminiProvider::extract_content(&response).unwrap(),
            "{\"planName\":1}"
        );
    }

    #[test]
    fn test_extract_content_empty_is_error() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        let error = GeminiProvider::extract_content(&response).unwrap_err();
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
    }

    #[test]
    fn test_rate_limit_maps_to_retry_hint() {
        let body = r#"{"error":{"message":"Quota exceeded. Please retry in 6.406453963s."}}"#;
        let error = GeminiProvider::map_api_error(429, body);
        assert_eq!(error.code, ErrorCode::ExternalRateLimited);
        assert!(error.message.contains("7 seconds"));
        assert_eq!(error.context.details["status"], 429);
    }

    #[test]
    fn test_server_error_keeps_status() {
        let error = GeminiProvider::map_api_error(503, "upstream overloaded");
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
        assert!(error.message.contains("upstream overloaded"));
        assert_eq!(error.context.details["status"], 503);
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = GeminiProvider::new("secret-key");
        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("gemini-1.5-flash"));
    }
}
