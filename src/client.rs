// ABOUTME: Public client surface implementing the FlightOfferPort trait
// ABOUTME: Flight search, location search, and the airport-to-city code fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client surface.
//!
//! [`AmadeusClient`] wires the transport, token machinery, and parsers into
//! the three operations the calling layer consumes. The [`FlightOfferPort`]
//! trait is the seam: controllers and services depend on it so tests can
//! substitute a fake provider.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::config::AmadeusConfig;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::{FlightOfferSearch, FlightOffersResponse, LocationSearch, LocationsResponse};
use crate::parser;
use crate::query;
use crate::transport::{classify_status, Transport};

/// Provider path for flight-offer searches
pub const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
/// Provider path for keyword location searches
pub const LOCATIONS_PATH: &str = "/v1/reference-data/locations";

/// Outbound port for flight and location searches.
///
/// The calling layer depends on this trait rather than on
/// [`AmadeusClient`] directly.
#[async_trait]
pub trait FlightOfferPort: Send + Sync {
    /// Search priced flight offers matching the criteria
    async fn search_flights(
        &self,
        request: &FlightOfferSearch,
    ) -> ProviderResult<FlightOffersResponse>;

    /// Search locations by keyword; first page only
    async fn search_locations(&self, search: &LocationSearch) -> ProviderResult<LocationsResponse>;

    /// Look a location up by IATA code, trying airports first and falling
    /// back to cities on 404
    async fn search_location_by_code(&self, code: &str) -> ProviderResult<LocationsResponse>;
}

/// Client for the Amadeus flight-data provider
#[derive(Debug, Clone)]
pub struct AmadeusClient {
    transport: Transport,
}

impl AmadeusClient {
    /// Build the client and its transport from a configuration.
    ///
    /// # Errors
    /// [`ProviderError::Unexpected`] when the HTTP client cannot be built.
    pub fn new(config: AmadeusConfig) -> ProviderResult<Self> {
        Ok(Self {
            transport: Transport::new(&config)?,
        })
    }

    fn parse_locations(body: &str) -> ProviderResult<LocationsResponse> {
        serde_json::from_str(body)
            .map_err(|e| ProviderError::parse(format!("invalid location response: {e}")))
    }
}

#[async_trait]
impl FlightOfferPort for AmadeusClient {
    async fn search_flights(
        &self,
        request: &FlightOfferSearch,
    ) -> ProviderResult<FlightOffersResponse> {
        info!(
            origin = %request.origin_location_code,
            destination = %request.destination_location_code,
            departure = %request.departure_date,
            "searching flights"
        );
        let params = query::flight_offers_params(request);
        let body = self.transport.get(FLIGHT_OFFERS_PATH, &params).await?;
        let response = parser::parse_flight_offers(&body)?;
        if !response.diagnostics.is_clean() {
            info!(
                dropped = response.diagnostics.dropped().len(),
                "flight search succeeded with dropped elements"
            );
        }
        Ok(response)
    }

    async fn search_locations(&self, search: &LocationSearch) -> ProviderResult<LocationsResponse> {
        debug!(keyword = %search.keyword, sub_type = %search.sub_type, "searching locations");
        let params = query::locations_params(search);
        let body = self.transport.get(LOCATIONS_PATH, &params).await?;
        Self::parse_locations(&body)
    }

    async fn search_location_by_code(&self, code: &str) -> ProviderResult<LocationsResponse> {
        let airport_path = format!("{LOCATIONS_PATH}/airports/{code}");
        let (status, body) = self.transport.get_with_status(&airport_path, &[]).await?;

        if status == StatusCode::NOT_FOUND {
            debug!("not found as airport, searching as city: {code}");
            let city_path = format!("{LOCATIONS_PATH}/cities/{code}");
            let (city_status, city_body) = self.transport.get_with_status(&city_path, &[]).await?;
            if city_status == StatusCode::NOT_FOUND {
                return Err(ProviderError::LocationNotFound {
                    code: code.to_owned(),
                });
            }
            let city_body = classify_status(city_status, city_body)?;
            return Self::parse_locations(&city_body);
        }

        let body = classify_status(status, body)?;
        Self::parse_locations(&body)
    }
}
