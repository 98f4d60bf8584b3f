// ABOUTME: OAuth2 bearer token cache and issuer with single-flight refresh
// ABOUTME: One token per process; concurrent callers coalesce onto one auth request
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token lifecycle.
//!
//! The provider hands out short-lived bearer tokens against a fixed client
//! credential pair. [`TokenCache`] holds the current token and its expiry,
//! answers "is a refresh needed now", and coordinates refreshes so that any
//! number of concurrent callers trigger at most one network exchange: the
//! refresh gate is an async mutex, and every waiter re-checks freshness
//! under the lock before deciding to hit the auth endpoint itself. The
//! exchange runs on a detached task that holds the gate until the new token
//! is installed, so a caller that abandons its search mid-refresh does not
//! abort the exchange other waiters share. The gate is never held across a
//! search call.
//!
//! A token is usable only while `now + 60s < expires_at`; the 60-second
//! safety margin is additionally baked into the stored expiry at install
//! time, so a token never gets used in its final minute.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error};

use crate::config::AmadeusConfig;
use crate::errors::{ProviderError, ProviderResult};

/// Seconds before expiry at which a token is already considered stale
pub const SAFETY_MARGIN_SECS: i64 = 60;

/// Provider path for the client-credentials exchange
pub const AUTH_PATH: &str = "/v1/security/oauth2/token";

/// A bearer token and the instant it stops being usable.
///
/// Replaced wholesale on each refresh, never partially mutated.
#[derive(Debug, Clone)]
pub struct Token {
    /// The bearer token value
    pub value: String,
    /// Expiry instant with the safety margin already applied
    pub expires_at: DateTime<Utc>,
}

/// Process-wide token cache.
///
/// This is the only shared mutable state in the client: one provider, one
/// credential pair, one token. Reads are concurrent; installs go through a
/// write lock; refreshes are serialized by [`TokenCache::bearer`].
#[derive(Debug, Default)]
pub struct TokenCache {
    current: RwLock<Option<Token>>,
    // Arc so the refresh task can own the guard across its own lifetime.
    refresh_gate: Arc<Mutex<()>>,
}

impl TokenCache {
    /// Empty cache; the first caller will trigger a refresh
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a refresh is needed now: no token held, or the token is
    /// within the safety margin of its expiry. Safe to call concurrently
    /// with a refresh in progress.
    pub async fn needs_refresh(&self) -> bool {
        let guard = self.current.read().await;
        guard.as_ref().map_or(true, |token| {
            Utc::now() + Duration::seconds(SAFETY_MARGIN_SECS) >= token.expires_at
        })
    }

    /// Last installed token value, fresh or not. Callers must have just
    /// confirmed freshness via the refresh protocol.
    pub async fn current_value(&self) -> Option<String> {
        let guard = self.current.read().await;
        guard.as_ref().map(|token| token.value.clone())
    }

    /// Atomically replace the token, discounting the safety margin from the
    /// provider-reported lifetime.
    pub async fn install(&self, value: String, ttl_seconds: i64) {
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds - SAFETY_MARGIN_SECS);
        let mut guard = self.current.write().await;
        *guard = Some(Token { value, expires_at });
    }

    /// Return a usable bearer token, refreshing it through `issuer` when
    /// needed.
    ///
    /// Single-flight: when several tasks find the token stale at once, one
    /// of them starts the network refresh while the rest wait on the gate
    /// and then observe the installed token. The exchange runs on a
    /// detached task that holds the gate until it finishes, so a caller
    /// that drops its search mid-flight does not abort a refresh other
    /// waiters share; the refresh is not owned by any single caller.
    ///
    /// # Errors
    /// Propagates the issuer failure ([`ProviderError::CredentialsRejected`],
    /// [`ProviderError::Timeout`], ...) to the caller that started the
    /// refresh; waiters that still see a stale cache afterwards retry the
    /// exchange serially and surface their own result.
    pub async fn bearer(self: &Arc<Self>, issuer: &TokenIssuer) -> ProviderResult<String> {
        if !self.needs_refresh().await {
            if let Some(value) = self.current_value().await {
                return Ok(value);
            }
        }

        let gate = Arc::clone(&self.refresh_gate).lock_owned().await;
        // Re-check under the lock: the previous holder may have refreshed.
        if self.needs_refresh().await {
            debug!("bearer token stale, refreshing");
            let cache = Arc::clone(self);
            let issuer = issuer.clone();
            let refresh = tokio::spawn(async move {
                // The guard moves into the task; waiters stay blocked until
                // the exchange completes even if the starter is cancelled.
                let _gate = gate;
                issuer.refresh(&cache).await
            });
            refresh.await.map_err(|e| {
                ProviderError::unexpected(format!("token refresh task failed: {e}"))
            })??;
        }
        self.current_value()
            .await
            .ok_or_else(|| ProviderError::unexpected("token cache empty after refresh"))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Performs the client-credentials exchange against the provider's auth
/// endpoint and installs the result into a [`TokenCache`].
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    http: reqwest::Client,
    token_url: String,
    api_key: String,
    api_secret: String,
}

impl TokenIssuer {
    /// Build an issuer sharing the client's HTTP connection pool
    #[must_use]
    pub fn new(http: reqwest::Client, config: &AmadeusConfig) -> Self {
        Self {
            http,
            token_url: format!("{}{AUTH_PATH}", config.base_url),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    /// Exchange the credentials for a fresh token and install it.
    ///
    /// Never retries internally; retry policy belongs to the caller.
    ///
    /// # Errors
    /// [`ProviderError::CredentialsRejected`] on an auth 4xx (carrying the
    /// upstream body), [`ProviderError::Timeout`] on a network timeout,
    /// [`ProviderError::Api`] on other non-success statuses, and
    /// [`ProviderError::Parse`] when the token body is unreadable.
    pub async fn refresh(&self, cache: &TokenCache) -> ProviderResult<()> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.api_key.as_str()),
            ("client_secret", self.api_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(classify_network_error)?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "authentication failed, response: {body}");
            return Err(ProviderError::CredentialsRejected { detail: body });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "token endpoint returned an error");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                detail: body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(format!("invalid token response: {e}")))?;
        if token.access_token.is_empty() {
            return Err(ProviderError::parse("token response without access_token"));
        }

        debug!("successfully obtained new access token");
        cache.install(token.access_token, token.expires_in).await;
        Ok(())
    }
}

/// Map reqwest send failures: timeouts become [`ProviderError::Timeout`],
/// anything else is [`ProviderError::Unexpected`].
pub(crate) fn classify_network_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::unexpected(error.to_string())
    }
}
