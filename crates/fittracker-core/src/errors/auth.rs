// ABOUTME: Account store error types for authentication and profile row access
// ABOUTME: Separates credential/session failures from profile fetch and upsert failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};

/// Errors raised by session and credential operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The account store rejected the request (bad credentials, duplicate signup, ...)
    #[error("{message}")]
    Rejected {
        /// HTTP status returned by the store
        status: u16,
        /// Message reported by the store
        message: String,
    },
    /// An operation required an identity but none is signed in
    #[error("No user logged in")]
    NotSignedIn,
    /// The account store could not be reached
    #[error("Account store unreachable: {message}")]
    Network {
        /// Transport failure details
        message: String,
    },
    /// The account store answered with something we could not decode
    #[error("Unexpected account store response: {message}")]
    InvalidResponse {
        /// Decoding failure details
        message: String,
    },
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        let code = match &error {
            AuthError::Rejected { status, .. } if *status == 429 => ErrorCode::ExternalRateLimited,
            AuthError::Rejected { .. } => ErrorCode::AuthInvalid,
            AuthError::NotSignedIn => ErrorCode::AuthRequired,
            AuthError::Network { .. } => ErrorCode::ExternalServiceUnavailable,
            AuthError::InvalidResponse { .. } => ErrorCode::ExternalServiceError,
        };
        Self::new(code, error.to_string())
    }
}

/// Errors raised by profile row reads and writes
///
/// A missing row is not an error: fetches return `Ok(None)` for identities that
/// have not finished onboarding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileStoreError {
    /// The row store rejected the query
    #[error("Profile store error {status}: {message}")]
    Rejected {
        /// HTTP status returned by the store
        status: u16,
        /// Store-specific error code (e.g. `PGRST116`), if reported
        code: Option<String>,
        /// Message reported by the store
        message: String,
    },
    /// The row store could not be reached
    #[error("Profile store unreachable: {message}")]
    Network {
        /// Transport failure details
        message: String,
    },
    /// A row could not be decoded
    #[error("Unexpected profile row: {message}")]
    InvalidResponse {
        /// Decoding failure details
        message: String,
    },
}

impl From<ProfileStoreError> for AppError {
    fn from(error: ProfileStoreError) -> Self {
        let code = match &error {
            ProfileStoreError::Rejected { .. } | ProfileStoreError::InvalidResponse { .. } => {
                ErrorCode::ExternalServiceError
            }
            ProfileStoreError::Network { .. } => ErrorCode::ExternalServiceUnavailable,
        };
        Self::new(code, error.to_string())
    }
}
