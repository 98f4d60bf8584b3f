// ABOUTME: Main library entry point for the Amadeus flight-data client
// ABOUTME: Exposes token lifecycle, transport, defensive parsing, and the search API surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Amadeus Flight Client
//!
//! A resilient async client for the Amadeus flight-offer and location search
//! APIs. It owns the OAuth2 client-credentials token lifecycle, issues
//! timeout-bounded HTTP calls with typed failure classification, and parses
//! the provider's semi-structured JSON payloads defensively: a single
//! malformed nested element is dropped with a logged diagnostic while the
//! rest of the payload still succeeds.
//!
//! ## Architecture
//!
//! - **`token`**: bearer token cache with single-flight refresh
//! - **`transport`**: outbound HTTP with token injection and error classification
//! - **`query`**: deterministic provider query-string construction
//! - **`parser`**: defensive flight-offer payload parsing with a diagnostic sink
//! - **`dictionaries`**: code-to-detail lookup table resolution
//! - **`client`**: the `FlightOfferPort` surface consumed by callers
//!
//! ## Example
//!
//! ```rust,no_run
//! use amadeus_flight_client::client::{AmadeusClient, FlightOfferPort};
//! use amadeus_flight_client::config::AmadeusConfig;
//! use amadeus_flight_client::models::FlightOfferSearch;
//! use chrono::NaiveDate;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AmadeusConfig::from_env()?;
//! let client = AmadeusClient::new(config)?;
//!
//! let request = FlightOfferSearch::new(
//!     "MAD",
//!     "JFK",
//!     NaiveDate::from_ymd_opt(2026, 3, 14).ok_or("bad date")?,
//!     1,
//! );
//! let response = client.search_flights(&request).await?;
//! println!("{} offers", response.offers.len());
//! # Ok(())
//! # }
//! ```

/// Client surface: `AmadeusClient` and the `FlightOfferPort` trait
pub mod client;

/// Environment-based provider configuration
pub mod config;

/// Code-to-detail dictionary resolution
pub mod dictionaries;

/// Closed error taxonomy for every failure the client surfaces
pub mod errors;

/// Immutable domain model for offers, locations, and search requests
pub mod models;

/// Defensive flight-offer payload parsing
pub mod parser;

/// Provider query parameter construction
pub mod query;

/// Bearer token cache and single-flight refresh
pub mod token;

/// Outbound HTTP transport with failure classification
pub mod transport;

/// Explicit search-request validators
pub mod validation;
