// ABOUTME: Re-exports command modules for the fittracker CLI
// ABOUTME: Plan pipeline commands and account store commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod account;
pub mod plan;
