// ABOUTME: In-memory account store for auth context and plan pipeline tests
// ABOUTME: Keeps sessions and profile rows in memory and broadcasts session changes

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use fittracker::account::AccountStore;
use fittracker::errors::{AuthError, ProfileStoreError};
use fittracker::models::{
    AuthEvent, AuthStateChange, OAuthProvider, ProfileRow, Session, User,
};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Account store double backed by in-memory maps
///
/// Registered accounts are keyed by email; a password mismatch is rejected
/// with status 400 like the hosted store. Failures can be injected per
/// operation to exercise error paths.
pub struct FakeAccountStore {
    accounts: Mutex<HashMap<String, (String, Session)>>,
    session: Mutex<Option<Session>>,
    profiles: Mutex<HashMap<Uuid, ProfileRow>>,
    events: broadcast::Sender<AuthStateChange>,
    fail_get_session: Mutex<bool>,
    fail_fetch: Mutex<bool>,
    fail_sign_out: Mutex<bool>,
    confirm_email: Mutex<bool>,
    upserts: Mutex<Vec<ProfileRow>>,
}

impl Default for FakeAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeAccountStore {
    /// Empty store with no session
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: Mutex::new(HashMap::new()),
            session: Mutex::new(None),
            profiles: Mutex::new(HashMap::new()),
            events,
            fail_get_session: Mutex::new(false),
            fail_fetch: Mutex::new(false),
            fail_sign_out: Mutex::new(false),
            confirm_email: Mutex::new(false),
            upserts: Mutex::new(Vec::new()),
        }
    }

    /// Register an account and return its session
    pub fn register(&self, email: &str, password: &str) -> Session {
        let session = Session {
            access_token: format!("token-{email}"),
            refresh_token: Some(format!("refresh-{email}")),
            expires_at: None,
            user: User {
                id: Uuid::new_v4(),
                email: Some(email.to_owned()),
            },
        };
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_owned(), (password.to_owned(), session.clone()));
        session
    }

    /// Start with `session` already active, as if restored from storage
    pub fn with_session(self, session: Session) -> Self {
        *self.session.lock().unwrap() = Some(session);
        self
    }

    /// Store a profile row directly
    pub fn insert_profile(&self, row: ProfileRow) {
        self.profiles.lock().unwrap().insert(row.id, row);
    }

    /// Make the initial session lookup fail
    pub fn fail_get_session(&self) {
        *self.fail_get_session.lock().unwrap() = true;
    }

    /// Make profile reads fail (or succeed again)
    pub fn set_fail_fetch(&self, fail: bool) {
        *self.fail_fetch.lock().unwrap() = fail;
    }

    /// Make the remote sign-out call fail
    pub fn fail_sign_out(&self) {
        *self.fail_sign_out.lock().unwrap() = true;
    }

    /// Require email confirmation so sign-up returns no session
    pub fn require_email_confirmation(&self) {
        *self.confirm_email.lock().unwrap() = true;
    }

    /// Every row passed to `upsert_profile`, in order
    pub fn upserts(&self) -> Vec<ProfileRow> {
        self.upserts.lock().unwrap().clone()
    }

    /// Push a session change to subscribers, as the hosted store would
    pub fn emit(&self, event: AuthEvent, session: Option<Session>) {
        (*self.session.lock().unwrap()).clone_from(&session);
        let _ = self.events.send(AuthStateChange { event, session });
    }
}

#[async_trait]
impl AccountStore for FakeAccountStore {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        if *self.fail_get_session.lock().unwrap() {
            return Err(AuthError::Network {
                message: "connection refused".to_owned(),
            });
        }
        Ok(self.session.lock().unwrap().clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthStateChange> {
        self.events.subscribe()
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AuthError> {
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(AuthError::Rejected {
                status: 422,
                message: "User already registered".to_owned(),
            });
        }
        let session = self.register(email, password);
        if *self.confirm_email.lock().unwrap() {
            return Ok(None);
        }
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(Some(session))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((stored, session)) if stored == password => {
                *self.session.lock().unwrap() = Some(session.clone());
                Ok(session.clone())
            }
            _ => Err(AuthError::Rejected {
                status: 400,
                message: "Invalid login credentials".to_owned(),
            }),
        }
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<String, AuthError> {
        Ok(format!(
            "https://fake.supabase.co/auth/v1/authorize?provider={}&redirect_to={redirect_to}",
            provider.as_str()
        ))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.session.lock().unwrap() = None;
        if *self.fail_sign_out.lock().unwrap() {
            return Err(AuthError::Network {
                message: "timed out".to_owned(),
            });
        }
        Ok(())
    }

    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, ProfileStoreError> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(ProfileStoreError::Rejected {
                status: 500,
                code: None,
                message: "relation unavailable".to_owned(),
            });
        }
        Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert_profile(&self, row: &ProfileRow) -> Result<(), ProfileStoreError> {
        self.upserts.lock().unwrap().push(row.clone());
        let mut profiles = self.profiles.lock().unwrap();
        let created_at = profiles
            .get(&row.id)
            .and_then(|existing| existing.created_at)
            .or(row.updated_at);
        profiles.insert(
            row.id,
            ProfileRow {
                created_at,
                ..row.clone()
            },
        );
        Ok(())
    }
}
