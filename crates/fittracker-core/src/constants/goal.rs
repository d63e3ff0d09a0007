// ABOUTME: Goal wizard constants: session limits, defaults, step titles, and story prompts
// ABOUTME: Shared by the intake state machine and the command-line front end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Fewest workouts per week
pub const MIN_WEEKLY_FREQUENCY: u8 = 2;
/// Most workouts per week
pub const MAX_WEEKLY_FREQUENCY: u8 = 7;
/// Frequency used until the user changes it
pub const DEFAULT_WEEKLY_FREQUENCY: u8 = 3;

/// Shortest session in minutes
pub const MIN_SESSION_MINUTES: u8 = 15;
/// Longest session in minutes
pub const MAX_SESSION_MINUTES: u8 = 90;
/// Session length granularity in minutes
pub const SESSION_MINUTES_STEP: u8 = 5;
/// Session length used until the user changes it
pub const DEFAULT_SESSION_MINUTES: u8 = 30;

/// Maximum personal narrative length in characters
pub const MAX_NARRATIVE_CHARS: usize = 500;

/// Titles shown for the four wizard steps, in order
pub const STEP_TITLES: [&str; 4] = [
    "Choose Your Goal",
    "Goal Details",
    "Tell Your Story",
    "Generate Your Plan",
];

/// Sentence starters offered while writing the personal narrative
pub const INSPIRATION_PROMPTS: [&str; 6] = [
    "I work long hours and...",
    "I've tried dieting before but...",
    "My biggest challenge is...",
    "I really enjoy...",
    "What motivates me most is...",
    "I struggle with...",
];
