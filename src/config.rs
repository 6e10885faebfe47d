use std::{env, time::Duration};

use crate::error::ConfigError;

const DEFAULT_EXTRACTOR_URL: &str = "http://localhost:8000/api/pdf-extract";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Service endpoints and credentials, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub extractor_url: String,
    pub supabase_url: String,
    pub supabase_key: String,
    /// per-request transport timeout
    pub timeout: Duration,
    pub user_id: String,
    pub tenant_id: String,
    /// delete partially seeded records when a run fails
    pub rollback_on_failure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "HTTP_TIMEOUT_SECS",
                value: raw.clone(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            extractor_url: lookup("EXTRACTOR_URL")
                .unwrap_or_else(|| DEFAULT_EXTRACTOR_URL.to_string()),
            supabase_url: required("SUPABASE_URL")?,
            supabase_key: required("SUPABASE_SERVICE_ROLE_KEY")?,
            timeout: Duration::from_secs(timeout),
            user_id: required("SEED_USER_ID")?,
            tenant_id: required("SEED_TENANT_ID")?,
            rollback_on_failure: lookup("ROLLBACK_ON_FAILURE")
                .is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes")),
        })
    }
}
