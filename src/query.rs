// ABOUTME: Provider query parameter construction for flight-offer and location searches
// ABOUTME: Mandatory fields always present; optional fields included only when non-default
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query builders.
//!
//! Parameters are emitted in a fixed insertion order. The order carries no
//! meaning for the provider but keeps built requests deterministic for
//! testing. A field is included only when present and non-default:
//! `children`/`infants` only when > 0, strings only when non-empty, `max`
//! only when > 0.

use crate::models::{FlightOfferSearch, LocationSearch};

/// Ordered query parameters for `/v2/shopping/flight-offers`
#[must_use]
pub fn flight_offers_params(request: &FlightOfferSearch) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("originLocationCode", request.origin_location_code.clone()),
        (
            "destinationLocationCode",
            request.destination_location_code.clone(),
        ),
        ("departureDate", request.departure_date.to_string()),
        ("adults", request.adults.to_string()),
    ];

    if let Some(return_date) = request.return_date {
        params.push(("returnDate", return_date.to_string()));
    }
    if request.children > 0 {
        params.push(("children", request.children.to_string()));
    }
    if request.infants > 0 {
        params.push(("infants", request.infants.to_string()));
    }
    if let Some(travel_class) = &request.travel_class {
        if !travel_class.is_empty() {
            params.push(("travelClass", travel_class.clone()));
        }
    }
    if let Some(non_stop) = request.non_stop {
        params.push(("nonStop", non_stop.to_string()));
    }
    if let Some(currency_code) = &request.currency_code {
        if !currency_code.is_empty() {
            params.push(("currencyCode", currency_code.clone()));
        }
    }
    if let Some(max_price) = request.max_price {
        params.push(("maxPrice", max_price.to_string()));
    }
    if request.max > 0 {
        params.push(("max", request.max.to_string()));
    }

    params
}

/// Ordered query parameters for `/v1/reference-data/locations`
#[must_use]
pub fn locations_params(search: &LocationSearch) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("subType", search.sub_type.clone()),
        ("keyword", search.keyword.clone()),
    ];

    if let Some(country_code) = &search.country_code {
        if !country_code.trim().is_empty() {
            params.push(("countryCode", country_code.clone()));
        }
    }
    if search.page_limit > 0 {
        params.push(("page[limit]", search.page_limit.to_string()));
    }
    if let Some(page_offset) = search.page_offset {
        if page_offset > 0 {
            params.push(("page[offset]", page_offset.to_string()));
        }
    }
    if let Some(sort) = &search.sort {
        if !sort.trim().is_empty() {
            params.push(("sort", sort.clone()));
        }
    }
    if let Some(view) = &search.view {
        if !view.trim().is_empty() {
            params.push(("view", view.clone()));
        }
    }

    params
}
