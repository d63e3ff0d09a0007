// ABOUTME: Scripted plan generator for pipeline tests without network access
// ABOUTME: Replays canned replies or errors and records every request it receives

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use fittracker::errors::{AppError, ErrorCode};
use fittracker::llm::{ChatRequest, ChatResponse, LlmProvider};
use serde_json::json;
use tokio::time::sleep;

/// One canned generator outcome
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Reply with this text
    Reply(String),
    /// Fail with this error code, message, and optional HTTP status
    Fail {
        code: ErrorCode,
        message: String,
        status: Option<u16>,
    },
}

impl Scripted {
    /// Failure as the Gemini client reports a non-success status
    pub fn status(status: u16, message: &str) -> Self {
        let code = if status == 429 {
            ErrorCode::ExternalRateLimited
        } else {
            ErrorCode::ExternalServiceError
        };
        Self::Fail {
            code,
            message: message.to_owned(),
            status: Some(status),
        }
    }

    /// Failure as the Gemini client reports a transport error
    pub fn unreachable() -> Self {
        Self::Fail {
            code: ErrorCode::ExternalServiceUnavailable,
            message: "Gemini: connection reset by peer".to_owned(),
            status: None,
        }
    }

    fn outcome(&self) -> Result<String, AppError> {
        match self {
            Self::Reply(text) => Ok(text.clone()),
            Self::Fail {
                code,
                message,
                status,
            } => {
                let error = AppError::new(*code, message.clone());
                Err(match status {
                    Some(status) => error.with_details(json!({ "status": status })),
                    None => error,
                })
            }
        }
    }
}

/// Generator double returning queued outcomes in order
///
/// When the queue runs dry the last outcome is repeated.
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Scripted>>,
    last: Mutex<Option<Scripted>>,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    /// Always answer with `reply`
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_outcomes(vec![Scripted::Reply(reply.into())])
    }

    /// Always fail the same way
    pub fn failing(failure: Scripted) -> Self {
        Self::with_outcomes(vec![failure])
    }

    /// Answer with each outcome in turn
    pub fn with_outcomes(outcomes: Vec<Scripted>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Wait `delay` before answering
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of completions requested so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_outcome(&self) -> Result<String, AppError> {
        let mut outcomes = self.outcomes.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(next) = outcomes.pop_front() {
            *last = Some(next);
        }
        last.as_ref()
            .map_or_else(|| Ok(String::new()), Scripted::outcome)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        let content = self.next_outcome()?;
        Ok(ChatResponse {
            content,
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.default_model().to_owned()),
        })
    }
}
