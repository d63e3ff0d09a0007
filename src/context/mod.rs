// ABOUTME: Explicitly constructed application contexts shared across operations
// ABOUTME: Currently the authentication context for session and profile state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application contexts
//!
//! Contexts are plain values created at startup and passed to the code that
//! needs them; nothing here is a process-wide singleton.

pub mod auth;

pub use auth::{AuthContext, AuthState, PROFILE_LOAD_FAILED, SESSION_LOAD_FAILED};
