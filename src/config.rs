// ABOUTME: Environment-based configuration for the Amadeus client
// ABOUTME: Base URL, client credentials, and network timeout with validation at load time
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider configuration.
//!
//! Credentials and the base URL come from the environment; misconfiguration
//! is caught here rather than on the first network call.

use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::{ProviderError, ProviderResult};

/// Environment variable holding the provider base URL
pub const ENV_BASE_URL: &str = "AMADEUS_BASE_URL";
/// Environment variable holding the OAuth2 client id
pub const ENV_API_KEY: &str = "AMADEUS_API_KEY";
/// Environment variable holding the OAuth2 client secret
pub const ENV_API_SECRET: &str = "AMADEUS_API_SECRET";
/// Optional environment variable overriding the per-leg network timeout
pub const ENV_TIMEOUT_SECS: &str = "AMADEUS_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Amadeus client
#[derive(Debug, Clone)]
pub struct AmadeusConfig {
    /// Base URL of the provider, e.g. `https://test.api.amadeus.com`
    pub base_url: String,
    /// OAuth2 client id
    pub api_key: String,
    /// OAuth2 client secret
    pub api_secret: String,
    /// Connect/read timeout applied to every network leg
    pub timeout: Duration,
}

impl AmadeusConfig {
    /// Build a configuration from explicit values.
    ///
    /// # Errors
    /// Returns [`ProviderError::Unexpected`] when the base URL is not a valid
    /// absolute URL or a credential is blank.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> ProviderResult<Self> {
        let base_url = base_url.into();
        let api_key = api_key.into().trim().to_owned();
        let api_secret = api_secret.into().trim().to_owned();

        Url::parse(&base_url).map_err(|e| {
            ProviderError::unexpected(format!("invalid Amadeus base URL {base_url:?}: {e}"))
        })?;
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(ProviderError::unexpected(
                "Amadeus API credentials are not configured",
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
            api_secret,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load the configuration from the environment.
    ///
    /// # Errors
    /// Returns [`ProviderError::Unexpected`] when a required variable is
    /// missing or blank, or the timeout override is not a positive integer.
    pub fn from_env() -> ProviderResult<Self> {
        let base_url = require_env(ENV_BASE_URL)?;
        let api_key = require_env(ENV_API_KEY)?;
        let api_secret = require_env(ENV_API_SECRET)?;

        let mut config = Self::new(base_url, api_key, api_secret)?;
        if let Ok(raw) = env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| {
                ProviderError::unexpected(format!("{ENV_TIMEOUT_SECS} must be a positive integer"))
            })?;
            if secs == 0 {
                return Err(ProviderError::unexpected(format!(
                    "{ENV_TIMEOUT_SECS} must be a positive integer"
                )));
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn require_env(name: &str) -> ProviderResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
        _ => Err(ProviderError::unexpected(format!(
            "{name} is not configured"
        ))),
    }
}
