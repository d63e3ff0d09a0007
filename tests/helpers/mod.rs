// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the in-memory account store and the scripted plan generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod fake_account_store;
pub mod scripted_provider;
