// ABOUTME: Re-exports helper modules for the fittracker CLI
// ABOUTME: Input file loading and terminal output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
pub mod input;
