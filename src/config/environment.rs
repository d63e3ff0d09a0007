// ABOUTME: Environment configuration for the account store and the plan generator
// ABOUTME: Missing account store settings are fatal; the generator key is checked on use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::constants::env_vars;
use crate::constants::plan::DEFAULT_PLAN_MODEL;
use crate::constants::supabase::DEFAULT_OAUTH_REDIRECT;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Account store connection settings
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project base URL, without trailing slash
    pub url: String,
    /// Public anon key sent as `apikey`
    pub anon_key: String,
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

/// Plan generator settings
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; plan generation fails with a configuration error when absent
    pub api_key: Option<String>,
    /// Model used for plan generation
    pub model: String,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Account store settings
    pub supabase: SupabaseConfig,
    /// Plan generator settings
    pub gemini: GeminiConfig,
    /// Return address for federated sign-in
    pub oauth_redirect_url: String,
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the account store URL or key is
    /// missing or the URL is not an http(s) URL.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| AppError::config_missing(key))
        };
        let optional = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let config = Self {
            environment: optional(env_vars::ENVIRONMENT)
                .map_or_else(Environment::default, |value| {
                    Environment::from_str_or_default(&value)
                }),
            supabase: SupabaseConfig {
                url: required(env_vars::SUPABASE_URL)?
                    .trim_end_matches('/')
                    .to_owned(),
                anon_key: required(env_vars::SUPABASE_ANON_KEY)?,
            },
            gemini: GeminiConfig {
                api_key: optional(env_vars::GEMINI_API_KEY),
                model: optional(env_vars::GEMINI_MODEL)
                    .unwrap_or_else(|| DEFAULT_PLAN_MODEL.to_owned()),
            },
            oauth_redirect_url: optional(env_vars::OAUTH_REDIRECT_URL)
                .unwrap_or_else(|| DEFAULT_OAUTH_REDIRECT.to_owned()),
        };
        config.validate()?;

        if config.gemini.api_key.is_none() {
            warn!(
                "{} not set; plan generation will be unavailable",
                env_vars::GEMINI_API_KEY
            );
        }
        Ok(config)
    }

    /// Check values that parsed but may still be unusable
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for a non-http(s) account store URL or
    /// redirect URL.
    pub fn validate(&self) -> AppResult<()> {
        for (key, value) in [
            (env_vars::SUPABASE_URL, &self.supabase.url),
            (env_vars::OAUTH_REDIRECT_URL, &self.oauth_redirect_url),
        ] {
            let parsed = Url::parse(value).map_err(|e| {
                AppError::new(ErrorCode::ConfigInvalid, format!("{key} is not a URL: {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::new(
                    ErrorCode::ConfigInvalid,
                    format!("{key} must use http or https"),
                ));
            }
        }
        Ok(())
    }

    /// Human-readable configuration summary with secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitTracker Configuration:\n\
             - Environment: {}\n\
             - Account store: {}\n\
             - Plan generator: {} ({})\n\
             - OAuth redirect: {}",
            self.environment,
            self.supabase.url,
            self.gemini.model,
            if self.gemini.api_key.is_some() {
                "configured"
            } else {
                "missing API key"
            },
            self.oauth_redirect_url,
        )
    }
}
