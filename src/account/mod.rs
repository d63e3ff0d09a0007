// ABOUTME: Account store contract: sessions, sign-in flows, and the profiles row store
// ABOUTME: Implemented over REST by SupabaseAccountStore and by in-memory fakes in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Account Store
//!
//! Identity, session, and profile persistence are owned by a hosted
//! database-as-a-service. The rest of the crate talks to it only through
//! [`AccountStore`], so the auth context can be driven by a fake in tests.

mod supabase;

pub use supabase::SupabaseAccountStore;

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::errors::{AuthError, ProfileStoreError};
use crate::models::{AuthStateChange, OAuthProvider, ProfileRow, Session};

/// Session and profile persistence backend
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Current session, if one is active
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Receive session-change notifications
    ///
    /// Each call returns an independent receiver; dropping it unsubscribes.
    fn subscribe(&self) -> broadcast::Receiver<AuthStateChange>;

    /// Register a new identity
    ///
    /// Returns `None` when the store requires email confirmation before
    /// issuing a session.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AuthError>;

    /// Sign in with email and password
    async fn sign_in_with_password(&self, email: &str, password: &str)
        -> Result<Session, AuthError>;

    /// Start federated sign-in; returns the provider URL to open
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<String, AuthError>;

    /// End the current session
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Profile row for `user_id`; `Ok(None)` when onboarding is not finished
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, ProfileStoreError>;

    /// Insert or update the row keyed by `row.id`
    async fn upsert_profile(&self, row: &ProfileRow) -> Result<(), ProfileStoreError>;
}
