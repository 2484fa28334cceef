//! Function runtime settings.

use std::time::Duration;

use crate::protocol::DEFAULT_TTL;

pub const RESPONSE_TTL_ENV: &str = "FUNCTION_RESPONSE_TTL_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    /// TTL advertised in every response
    pub response_ttl: Duration,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            response_ttl: DEFAULT_TTL,
        }
    }
}

impl FunctionConfig {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for absent or invalid values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(RESPONSE_TTL_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.response_ttl = Duration::from_secs(secs),
                Err(e) => tracing::warn!(
                    variable = RESPONSE_TTL_ENV,
                    value = %raw,
                    error = %e,
                    "Ignoring invalid response TTL"
                ),
            }
        }

        config
    }

    pub fn with_response_ttl(mut self, ttl: Duration) -> Self {
        self.response_ttl = ttl;
        self
    }
}
