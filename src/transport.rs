// ABOUTME: Outbound HTTP transport with transparent bearer injection
// ABOUTME: Classifies transport failures into the closed error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport layer.
//!
//! Every outbound search call goes through [`Transport::get`]: it acquires a
//! fresh bearer token via the single-flight path, attaches the
//! `Authorization` header, issues the GET with 30-second connect/read
//! timeouts, and classifies the outcome. HTTP 429 maps to
//! [`ProviderError::RateLimitExceeded`]; other non-success statuses map to
//! [`ProviderError::Api`] carrying the first structured error detail from
//! the body when one exists.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::AmadeusConfig;
use crate::errors::{ProviderError, ProviderResult};
use crate::token::{classify_network_error, TokenCache, TokenIssuer};

/// Token-injecting HTTP transport bound to one provider base URL
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<TokenCache>,
    issuer: TokenIssuer,
}

impl Transport {
    /// Build the transport, its connection pool, and the token machinery.
    ///
    /// The pool keeps connections alive and follows redirects; connect and
    /// read timeouts come from the configuration (30s by default).
    ///
    /// # Errors
    /// [`ProviderError::Unexpected`] when the HTTP client cannot be built.
    pub fn new(config: &AmadeusConfig) -> ProviderResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::unexpected(format!("failed to build HTTP client: {e}")))?;

        let issuer = TokenIssuer::new(http.clone(), config);
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            cache: Arc::new(TokenCache::new()),
            issuer,
        })
    }

    /// Shared token cache, exposed for coordination and tests
    #[must_use]
    pub fn token_cache(&self) -> Arc<TokenCache> {
        Arc::clone(&self.cache)
    }

    /// Authenticated GET returning the response body, with the full status
    /// classification applied.
    ///
    /// # Errors
    /// [`ProviderError::RateLimitExceeded`] on 429, [`ProviderError::Api`]
    /// on other non-success statuses, [`ProviderError::Timeout`] on a
    /// network timeout, and the auth errors of the refresh path.
    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> ProviderResult<String> {
        let (status, body) = self.get_with_status(path, params).await?;
        classify_status(status, body)
    }

    /// Authenticated GET returning status and body without mapping the
    /// status to an error. Used by the airport-to-city location fallback,
    /// which treats 404 as a signal rather than a failure.
    ///
    /// # Errors
    /// [`ProviderError::Timeout`] on a network timeout, auth errors from the
    /// refresh path, [`ProviderError::Unexpected`] on other network
    /// failures.
    pub async fn get_with_status(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ProviderResult<(StatusCode, String)> {
        let token = self.cache.bearer(&self.issuer).await?;
        let url = format!("{}{path}", self.base_url);
        debug!("calling Amadeus API: {path}");

        let response = self
            .http
            .get(&url)
            .query(params)
            .bearer_auth(token)
            .send()
            .await
            .map_err(classify_network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_network_error)?;
        Ok((status, body))
    }
}

/// Map a non-success status to the error taxonomy; pass the body through on
/// success.
///
/// # Errors
/// [`ProviderError::RateLimitExceeded`] on 429; [`ProviderError::Api`] with
/// the extracted upstream detail otherwise.
pub fn classify_status(status: StatusCode, body: String) -> ProviderResult<String> {
    if status.is_success() {
        return Ok(body);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        error!("Amadeus API rate limit exceeded");
        return Err(ProviderError::RateLimitExceeded);
    }
    let detail = extract_error_detail(&body);
    error!(status = status.as_u16(), "Amadeus API call failed: {detail}");
    Err(ProviderError::Api {
        status: status.as_u16(),
        detail,
    })
}

/// First structured error detail from an upstream error envelope
/// (`errors[0].detail`), falling back to the raw body.
#[must_use]
pub fn extract_error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|root| {
            root.get("errors")?
                .as_array()?
                .first()?
                .get("detail")?
                .as_str()
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.to_owned())
}
