// ABOUTME: Authentication context holding the session, identity, and profile row
// ABOUTME: Subscribes to account store session changes with a scoped listener task
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::account::AccountStore;
use crate::errors::{AppResult, AuthError};
use crate::logging::AppLogger;
use crate::models::{AuthEvent, AuthStateChange, OAuthProvider, Profile, ProfileRow, Session, User};

/// Message recorded when the initial session lookup fails
pub const SESSION_LOAD_FAILED: &str = "Failed to get session";

/// Message recorded when the profile row cannot be read
pub const PROFILE_LOAD_FAILED: &str = "Failed to load profile";

/// Snapshot of the signed-in state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    /// Signed-in identity
    pub user: Option<User>,
    /// Active session
    pub session: Option<Session>,
    /// Stored profile row; `None` until onboarding completes
    pub profile: Option<ProfileRow>,
    /// Initial session lookup still running
    pub loading: bool,
    /// Inline message for the last failed operation
    pub error: Option<String>,
}

impl AuthState {
    /// Signed-in identity id
    #[must_use]
    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|user| user.id)
    }

    /// Whether onboarding should be shown
    #[must_use]
    pub const fn needs_onboarding(&self) -> bool {
        self.user.is_some() && self.profile.is_none() && !self.loading
    }
}

/// Listener task aborted when the guard goes away
struct SubscriptionGuard {
    handle: JoinHandle<()>,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Session and profile state for one client
///
/// Construct with [`AuthContext::initialize`]; the session-change listener
/// lives until [`AuthContext::dispose`] is called or the context is dropped.
pub struct AuthContext {
    store: Arc<dyn AccountStore>,
    state: Arc<RwLock<AuthState>>,
    subscription: Option<SubscriptionGuard>,
}

impl AuthContext {
    /// Restore the current session, load its profile, and start listening
    pub async fn initialize(store: Arc<dyn AccountStore>) -> Self {
        let state = Arc::new(RwLock::new(AuthState {
            loading: true,
            ..AuthState::default()
        }));
        // Subscribe before the lookup so no change between the two is missed
        let receiver = store.subscribe();

        match store.get_session().await {
            Ok(session) => {
                let user_id = session.as_ref().map(|s| s.user.id);
                apply_session(&store, &state, session).await;
                let has_profile = state.read().await.profile.is_some();
                AppLogger::log_auth_event(AuthEvent::InitialSession, user_id, has_profile);
            }
            Err(error) => {
                warn!(error = %error, "initial session lookup failed");
                state.write().await.error = Some(SESSION_LOAD_FAILED.to_owned());
            }
        }
        state.write().await.loading = false;

        let handle = tokio::spawn(listen(Arc::clone(&store), Arc::clone(&state), receiver));
        Self {
            store,
            state,
            subscription: Some(SubscriptionGuard { handle }),
        }
    }

    /// Stop listening for session changes
    pub fn dispose(&mut self) {
        if self.subscription.take().is_some() {
            debug!("auth context disposed");
        }
    }

    /// Whether the session-change listener is running
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|guard| !guard.handle.is_finished())
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Stored profile decoded into typed values
    ///
    /// A row with unrecognized options is logged and treated as absent.
    pub async fn profile(&self) -> Option<Profile> {
        let state = self.state.read().await;
        let row = state.profile.as_ref()?;
        match row.to_profile() {
            Ok(profile) => Some(profile),
            Err(error) => {
                warn!(user_id = %row.id, error = %error, "stored profile is not usable");
                None
            }
        }
    }

    /// Register with email and password
    ///
    /// # Errors
    ///
    /// Returns the store's [`AuthError`]; its message is also recorded in state.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.clear_error().await;
        match self.store.sign_up(email, password).await {
            Ok(Some(session)) => {
                apply_session(&self.store, &self.state, Some(session)).await;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(error) => Err(self.record(error).await),
        }
    }

    /// Sign in with email and password
    ///
    /// # Errors
    ///
    /// Returns the store's [`AuthError`]; its message is also recorded in state.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.clear_error().await;
        match self.store.sign_in_with_password(email, password).await {
            Ok(session) => {
                apply_session(&self.store, &self.state, Some(session)).await;
                Ok(())
            }
            Err(error) => Err(self.record(error).await),
        }
    }

    /// Start Google sign-in; returns the URL to open
    ///
    /// # Errors
    ///
    /// Returns the store's [`AuthError`]; its message is also recorded in state.
    pub async fn sign_in_with_google(&self, redirect_to: &str) -> Result<String, AuthError> {
        self.clear_error().await;
        match self
            .store
            .sign_in_with_oauth(OAuthProvider::Google, redirect_to)
            .await
        {
            Ok(url) => Ok(url),
            Err(error) => Err(self.record(error).await),
        }
    }

    /// End the session and forget the profile
    ///
    /// Local state is cleared even when the store call fails.
    ///
    /// # Errors
    ///
    /// Returns the store's [`AuthError`].
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let result = self.store.sign_out().await;
        {
            let mut state = self.state.write().await;
            state.user = None;
            state.session = None;
            state.profile = None;
            state.error = None;
        }
        if let Err(error) = &result {
            warn!(error = %error, "sign-out failed at the account store");
        }
        result
    }

    /// Save `profile` for the signed-in identity and reload it
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` ("No user logged in") without a session, or the
    /// profile store failure.
    pub async fn update_profile(&self, profile: &Profile) -> AppResult<()> {
        let user_id = self
            .state
            .read()
            .await
            .user_id()
            .ok_or(AuthError::NotSignedIn)?;

        let row = ProfileRow::from_profile(user_id, profile, Utc::now());
        self.store.upsert_profile(&row).await?;
        load_profile(&self.store, &self.state, user_id).await;
        Ok(())
    }

    /// Re-read the profile row for the signed-in identity
    pub async fn refresh_profile(&self) {
        let user_id = self.state.read().await.user_id();
        if let Some(user_id) = user_id {
            load_profile(&self.store, &self.state, user_id).await;
        }
    }

    /// Dismiss the inline error message
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    async fn record(&self, error: AuthError) -> AuthError {
        warn!(error = %error, "auth operation failed");
        self.state.write().await.error = Some(error.to_string());
        error
    }
}

impl Debug for AuthContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AuthContext")
            .field("subscribed", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

/// Record `session` and load or clear the matching profile
async fn apply_session(
    store: &Arc<dyn AccountStore>,
    state: &Arc<RwLock<AuthState>>,
    session: Option<Session>,
) {
    let user_id = session.as_ref().map(|s| s.user.id);
    {
        let mut guard = state.write().await;
        guard.user = session.as_ref().map(|s| s.user.clone());
        guard.session = session;
        if user_id.is_none() {
            guard.profile = None;
        }
    }
    if let Some(user_id) = user_id {
        load_profile(store, state, user_id).await;
    }
}

async fn load_profile(store: &Arc<dyn AccountStore>, state: &Arc<RwLock<AuthState>>, user_id: Uuid) {
    let fetched = store.fetch_profile(user_id).await;
    let mut guard = state.write().await;
    // The identity may have changed while the fetch was in flight
    if guard.user_id() != Some(user_id) {
        return;
    }
    match fetched {
        Ok(row) => guard.profile = row,
        Err(error) => {
            warn!(user_id = %user_id, error = %error, "profile fetch failed");
            guard.profile = None;
            guard.error = Some(PROFILE_LOAD_FAILED.to_owned());
        }
    }
}

async fn listen(
    store: Arc<dyn AccountStore>,
    state: Arc<RwLock<AuthState>>,
    mut receiver: Receiver<AuthStateChange>,
) {
    loop {
        match receiver.recv().await {
            Ok(AuthStateChange { event, session }) => {
                let user_id = session.as_ref().map(|s| s.user.id);
                apply_session(&store, &state, session).await;
                let has_profile = state.read().await.profile.is_some();
                AppLogger::log_auth_event(event, user_id, has_profile);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "session listener lagged; continuing with newest change");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
