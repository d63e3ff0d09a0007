// ABOUTME: Supabase implementation of the account store over the GoTrue and PostgREST APIs
// ABOUTME: Keeps the active session in memory and broadcasts session changes to subscribers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use super::AccountStore;
use crate::config::SupabaseConfig;
use crate::constants::supabase::{AUTH_PATH, NO_ROWS_CODE, PROFILES_TABLE, REST_PATH};
use crate::constants::AUTH_EVENT_CHANNEL_CAPACITY;
use crate::errors::{auth_transport_error, profile_transport_error, AuthError, ProfileStoreError};
use crate::models::{AuthEvent, AuthStateChange, OAuthProvider, ProfileRow, Session, User};

/// Single-object responses make PostgREST report "no rows" as `PGRST116`
const PGRST_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Upsert keyed on the primary key without echoing the row back
const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GoTrueSession {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: GoTrueUser,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

impl GoTrueSession {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
            .or_else(|| self.expires_in.map(|seconds| now + Duration::seconds(seconds)));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: User {
                id: self.user.id,
                email: self.user.email,
            },
        }
    }
}

/// GoTrue reports errors under several field names depending on the endpoint
#[derive(Debug, Default, Deserialize)]
struct GoTrueErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl GoTrueErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ============================================================================
// Store Implementation
// ============================================================================

/// Account store backed by a Supabase project
pub struct SupabaseAccountStore {
    config: SupabaseConfig,
    client: Client,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthStateChange>,
}

impl SupabaseAccountStore {
    /// Create a store for the configured project with no active session
    #[must_use]
    pub fn new(config: SupabaseConfig) -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            client: Client::new(),
            session: RwLock::new(None),
            events,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}{AUTH_PATH}/{path}", self.config.url)
    }

    fn profiles_url(&self) -> String {
        format!("{}{REST_PATH}/{PROFILES_TABLE}", self.config.url)
    }

    fn with_api_key(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.config.anon_key)
    }

    /// Row requests carry the user's token so row-level security applies
    async fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self
            .session
            .read()
            .await
            .as_ref()
            .map_or_else(|| self.config.anon_key.clone(), |s| s.access_token.clone());
        self.with_api_key(builder).bearer_auth(token)
    }

    fn broadcast(&self, event: AuthEvent, session: Option<Session>) {
        if self
            .events
            .send(AuthStateChange { event, session })
            .is_err()
        {
            debug!(?event, "no session listeners");
        }
    }

    async fn store_session(&self, session: Session, event: AuthEvent) -> Session {
        *self.session.write().await = Some(session.clone());
        self.broadcast(event, Some(session.clone()));
        session
    }

    async fn rejected(response: Response) -> AuthError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GoTrueErrorBody>(&body)
            .ok()
            .and_then(GoTrueErrorBody::into_message)
            .unwrap_or_else(|| format!("Account store returned status {status}"));
        AuthError::Rejected { status, message }
    }

    async fn token_grant(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<GoTrueSession, AuthError> {
        let response = self
            .with_api_key(self.client.post(self.auth_url("token")))
            .query(&[("grant_type", grant_type)])
            .json(&body)
            .send()
            .await
            .map_err(|e| auth_transport_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }
        response
            .json::<GoTrueSession>()
            .await
            .map_err(|e| auth_transport_error(&e))
    }

    /// Renew an expired session with its refresh token
    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let renewed = self
            .token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await?;
        Ok(self
            .store_session(renewed.into_session(Utc::now()), AuthEvent::TokenRefreshed)
            .await)
    }
}

#[async_trait]
impl AccountStore for SupabaseAccountStore {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let current = self.session.read().await.clone();
        let Some(session) = current else {
            return Ok(None);
        };

        let expired = session.expires_at.is_some_and(|at| at <= Utc::now());
        match (expired, session.refresh_token.as_deref()) {
            (false, _) => Ok(Some(session)),
            (true, Some(refresh_token)) => match self.refresh(refresh_token).await {
                Ok(renewed) => Ok(Some(renewed)),
                Err(error) => {
                    warn!(error = %error, "session refresh failed");
                    *self.session.write().await = None;
                    self.broadcast(AuthEvent::SignedOut, None);
                    Err(error)
                }
            },
            (true, None) => {
                *self.session.write().await = None;
                self.broadcast(AuthEvent::SignedOut, None);
                Ok(None)
            }
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthStateChange> {
        self.events.subscribe()
    }

    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AuthError> {
        let response = self
            .with_api_key(self.client.post(self.auth_url("signup")))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| auth_transport_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| auth_transport_error(&e))?;
        if body.get("access_token").is_none() {
            info!("sign-up accepted; email confirmation pending");
            return Ok(None);
        }

        let issued: GoTrueSession =
            serde_json::from_value(body).map_err(|e| AuthError::InvalidResponse {
                message: e.to_string(),
            })?;
        Ok(Some(
            self.store_session(issued.into_session(Utc::now()), AuthEvent::SignedIn)
                .await,
        ))
    }

    #[instrument(skip(self, password))]
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let issued = self
            .token_grant("password", json!({ "email": email, "password": password }))
            .await?;
        Ok(self
            .store_session(issued.into_session(Utc::now()), AuthEvent::SignedIn)
            .await)
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<String, AuthError> {
        let mut url =
            Url::parse(&self.auth_url("authorize")).map_err(|e| AuthError::InvalidResponse {
                message: format!("invalid authorize URL: {e}"),
            })?;
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        Ok(url.into())
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };
        self.broadcast(AuthEvent::SignedOut, None);

        let response = self
            .with_api_key(self.client.post(self.auth_url("logout")))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| auth_transport_error(&e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejected(response).await)
        }
    }

    #[instrument(skip(self))]
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, ProfileStoreError> {
        let request = self
            .client
            .get(self.profiles_url())
            .query(&[("id", format!("eq.{user_id}")), ("select", "*".to_owned())])
            .header(ACCEPT, PGRST_OBJECT);
        let response = self
            .authorized(request)
            .await
            .send()
            .await
            .map_err(|e| profile_transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| profile_transport_error(&e))?;

        if status.is_success() {
            return serde_json::from_str(&body)
                .map(Some)
                .map_err(|e| ProfileStoreError::InvalidResponse {
                    message: e.to_string(),
                });
        }

        let error = serde_json::from_str::<PostgrestErrorBody>(&body).unwrap_or_default();
        if error.code.as_deref() == Some(NO_ROWS_CODE) {
            debug!("no profile row yet");
            return Ok(None);
        }
        Err(ProfileStoreError::Rejected {
            status: status.as_u16(),
            code: error.code,
            message: error.message.unwrap_or(body),
        })
    }

    #[instrument(skip(self, row), fields(user_id = %row.id))]
    async fn upsert_profile(&self, row: &ProfileRow) -> Result<(), ProfileStoreError> {
        let request = self
            .client
            .post(self.profiles_url())
            .header("Prefer", UPSERT_PREFERENCE)
            .json(row);
        let response = self
            .authorized(request)
            .await
            .send()
            .await
            .map_err(|e| profile_transport_error(&e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let error = serde_json::from_str::<PostgrestErrorBody>(&body).unwrap_or_default();
        Err(ProfileStoreError::Rejected {
            status: status.as_u16(),
            code: error.code,
            message: error.message.unwrap_or(body),
        })
    }
}

impl Debug for SupabaseAccountStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SupabaseAccountStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SupabaseAccountStore {
        SupabaseAccountStore::new(SupabaseConfig {
            url: "https://project.supabase.co".to_owned(),
            anon_key: "anon".to_owned(),
        })
    }

    #[tokio::test]
    async fn test_oauth_url_carries_provider_and_redirect() {
        let url = store()
            .sign_in_with_oauth(OAuthProvider::Google, "http://localhost:5173")
            .await
            .unwrap();
        assert_eq!(
            url,
            "https://project.supabase.co/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A5173"
        );
    }

    #[tokio::test]
    async fn test_no_session_initially() {
        assert!(store().get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_noop() {
        let store = store();
        let mut events = store.subscribe();
        store.sign_out().await.unwrap();
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_session_expiry_from_expires_in() {
        let now = Utc::now();
        let wire: GoTrueSession = serde_json::from_value(json!({
            "access_token": "token",
            "refresh_token": "refresh",
            "expires_in": 3600,
            "user": { "id": Uuid::nil(), "email": "ana@example.com" }
        }))
        .unwrap();
        let session = wire.into_session(now);
        assert_eq!(session.expires_at, Some(now + Duration::seconds(3600)));
        assert_eq!(session.user.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_error_message_prefers_msg_then_description() {
        let body: GoTrueErrorBody = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid login credentials"));

        let body: GoTrueErrorBody =
            serde_json::from_str(r#"{"code":422,"msg":"User already registered"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("User already registered"));
    }
}
