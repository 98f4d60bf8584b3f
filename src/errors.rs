// ABOUTME: Closed error taxonomy for the Amadeus client
// ABOUTME: One variant per failure kind so callers can branch on rate-limit vs timeout vs permanent 4xx
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types surfaced by the client.
//!
//! The taxonomy is deliberately closed: auth rejection, upstream API error,
//! rate limiting, timeout, invalid payload shape, invalid timestamp, missing
//! location, and two catch-alls. Per-element parse failures inside a payload
//! never reach this type — the element is dropped and recorded in
//! [`crate::parser::ParseDiagnostics`] instead. The client performs no
//! automatic retries; the variants carry enough information (429 vs timeout
//! vs permanent 4xx) for a caller-level resilience layer to decide.

use thiserror::Error;

/// Result alias used across the crate
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Every failure kind the client can surface
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The auth endpoint rejected the client credentials (4xx)
    #[error("authentication failed with the Amadeus API: {detail}")]
    CredentialsRejected {
        /// Upstream error body returned by the token endpoint
        detail: String,
    },

    /// A search endpoint returned a non-success status other than 429
    #[error("error in Amadeus API: {status} - {detail}")]
    Api {
        /// Upstream HTTP status code
        status: u16,
        /// First structured error detail from the body, or the raw body
        detail: String,
    },

    /// The provider returned HTTP 429; callers should back off
    #[error("rate limit exceeded, please try again later")]
    RateLimitExceeded,

    /// A connect/read/write timeout elapsed
    #[error("the request timed out, please try again")]
    Timeout,

    /// A required field was missing from the provider payload
    #[error("invalid provider response: {message}")]
    InvalidResponse {
        /// Which field or shape requirement was violated
        message: String,
    },

    /// A timestamp in the payload failed to parse as an ISO local date-time
    #[error("invalid datetime format: {message}")]
    InvalidDate {
        /// The offending value or parse failure
        message: String,
    },

    /// A location code resolved as neither airport nor city
    #[error("location with code {code} not found")]
    LocationNotFound {
        /// The IATA code that was looked up
        code: String,
    },

    /// The payload was not parseable at all
    #[error("error processing Amadeus response: {message}")]
    Parse {
        /// Underlying parse failure
        message: String,
    },

    /// Anything else: connection failures, invalid configuration, bugs
    #[error("unexpected error processing request: {message}")]
    Unexpected {
        /// Human-readable cause
        message: String,
    },
}

impl ProviderError {
    /// Shorthand for an [`ProviderError::InvalidResponse`]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Shorthand for an [`ProviderError::InvalidDate`]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Shorthand for a [`ProviderError::Parse`]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Shorthand for an [`ProviderError::Unexpected`]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Upstream HTTP status, where one exists for this failure
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimitExceeded => Some(429),
            _ => None,
        }
    }
}
