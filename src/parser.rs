// ABOUTME: Defensive parser for the semi-structured flight-offer payload
// ABOUTME: Hard-required fields abort the element; everything else defaults; drops are recorded
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flight-offer payload parsing.
//!
//! The provider's payload is internally inconsistent often enough that a
//! strict decoder would reject whole responses over one bad element. The
//! policy here is two-tier, preserved from the upstream behavior:
//!
//! - A handful of truly-required fields (`id`, `source`, `price`,
//!   `itineraries` on an offer; `currency`/`total`/`base` on a price;
//!   `iataCode`/`at` on a flight point) abort the element they belong to.
//! - Everything else silently takes a documented default: booleans `false`,
//!   counts `0`, strings `""`, `pricingOptions` an empty flag set, baggage
//!   allowances all-zero, `amenities` an empty list.
//!
//! An aborted offer, traveler pricing, fare detail, or amenity is dropped
//! with a logged diagnostic while the rest of the payload still succeeds;
//! every drop lands in [`ParseDiagnostics`]. A malformed `at` timestamp is
//! never defaulted — it would corrupt itinerary ordering — so it drops the
//! offer via [`ProviderError::InvalidDate`]. Only a missing top-level
//! `data`/`meta` shape aborts the whole call.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use crate::dictionaries;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::{
    Aircraft, Amenity, FareDetailsBySegment, Fee, FlightOffer, FlightOffersResponse, FlightPoint,
    IncludedBags, Itinerary, Meta, Money, Operating, Price, PricingOptions, Segment,
    TravelerPricing,
};

/// Record of every element dropped while parsing one payload.
///
/// The single sink for the parse-or-skip policy: tests and callers can
/// assert drop counts instead of scraping logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseDiagnostics {
    dropped: Vec<DroppedElement>,
}

/// One dropped element and why it was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedElement {
    /// What kind of element was dropped, e.g. `flight offer`
    pub context: &'static str,
    /// The parse failure that caused the drop
    pub reason: String,
}

impl ParseDiagnostics {
    /// Elements dropped from this payload, in encounter order
    #[must_use]
    pub fn dropped(&self) -> &[DroppedElement] {
        &self.dropped
    }

    /// Whether the payload parsed without dropping anything
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }

    fn record(&mut self, context: &'static str, error: &ProviderError) {
        warn!("error parsing {context}: {error}");
        self.dropped.push(DroppedElement {
            context,
            reason: error.to_string(),
        });
    }
}

/// Parse a raw `/v2/shopping/flight-offers` body into the domain graph.
///
/// # Errors
/// [`ProviderError::Parse`] when the body is not JSON,
/// [`ProviderError::InvalidResponse`] when the top-level `data` array or
/// `meta.count` is missing. Per-offer failures do not surface here; the
/// offer is dropped and recorded in the returned diagnostics.
pub fn parse_flight_offers(body: &str) -> ProviderResult<FlightOffersResponse> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::parse(format!("response is not valid JSON: {e}")))?;

    let data = root
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::invalid_response("response must have a data array"))?;
    let meta = parse_meta(root.get("meta"))?;

    let mut diagnostics = ParseDiagnostics::default();
    let mut offers = Vec::with_capacity(data.len());
    for node in data {
        match parse_offer(node, &mut diagnostics) {
            Ok(offer) => offers.push(offer),
            Err(e) => diagnostics.record("flight offer", &e),
        }
    }

    let dictionaries = dictionaries::resolve(root.get("dictionaries"));

    Ok(FlightOffersResponse {
        meta,
        offers,
        dictionaries,
        diagnostics,
    })
}

fn parse_meta(meta: Option<&Value>) -> ProviderResult<Meta> {
    let meta = meta
        .filter(|node| !node.is_null())
        .ok_or_else(|| ProviderError::invalid_response("response must have a meta object"))?;
    let count = require(meta, "count", "meta must have a count")?
        .as_u64()
        .ok_or_else(|| ProviderError::invalid_response("meta count must be a number"))?;
    // The self link is presentation data; tolerate its absence.
    let link = meta
        .get("links")
        .map(|links| text_or_default(links, "self"))
        .unwrap_or_default();
    Ok(Meta { count, link })
}

fn parse_offer(offer: &Value, diagnostics: &mut ParseDiagnostics) -> ProviderResult<FlightOffer> {
    let id = require_text(offer, "id", "flight offer must have an ID")?;
    let source = require_text(offer, "source", "flight offer must have a source")?;
    let price = parse_price(require(offer, "price", "flight offer must have a price")?)?;
    let itineraries = parse_itineraries(require(
        offer,
        "itineraries",
        "flight offer must have itineraries",
    )?)?;

    Ok(FlightOffer {
        id,
        source,
        instant_ticketing_required: bool_or_default(offer, "instantTicketingRequired"),
        non_homogeneous: bool_or_default(offer, "nonHomogeneous"),
        one_way: bool_or_default(offer, "oneWay"),
        last_ticketing_date: optional_text(offer, "lastTicketingDate"),
        number_of_bookable_seats: count_or_default(offer, "numberOfBookableSeats"),
        itineraries,
        price,
        pricing_options: parse_pricing_options(offer.get("pricingOptions")),
        validating_airline_codes: string_list(offer.get("validatingAirlineCodes")),
        traveler_pricings: parse_traveler_pricings(offer.get("travelerPricings"), diagnostics),
    })
}

fn parse_itineraries(itineraries: &Value) -> ProviderResult<Vec<Itinerary>> {
    let nodes = itineraries
        .as_array()
        .ok_or_else(|| ProviderError::invalid_response("itineraries must be an array"))?;

    let mut result = Vec::with_capacity(nodes.len());
    for itinerary in nodes {
        let duration = require_text(itinerary, "duration", "itinerary must have a duration")?;
        let segments = require(itinerary, "segments", "itinerary must have segments")?
            .as_array()
            .ok_or_else(|| ProviderError::invalid_response("segments must be an array"))?
            .iter()
            .map(parse_segment)
            .collect::<ProviderResult<Vec<_>>>()?;
        result.push(Itinerary { duration, segments });
    }
    Ok(result)
}

fn parse_segment(segment: &Value) -> ProviderResult<Segment> {
    let departure = parse_flight_point(require(
        segment,
        "departure",
        "segment must have departure information",
    )?)?;
    let arrival = parse_flight_point(require(
        segment,
        "arrival",
        "segment must have arrival information",
    )?)?;
    let carrier_code = require_text(segment, "carrierCode", "segment must have a carrier code")?;
    let number = require_text(segment, "number", "segment must have a flight number")?;

    Ok(Segment {
        departure,
        arrival,
        carrier_code,
        number,
        aircraft: segment.get("aircraft").map(|node| Aircraft {
            code: text_or_default(node, "code"),
        }),
        operating: segment.get("operating").map(|node| Operating {
            carrier_code: text_or_default(node, "carrierCode"),
        }),
        duration: text_or_default(segment, "duration"),
        id: text_or_default(segment, "id"),
        number_of_stops: count_or_default(segment, "numberOfStops"),
        blacklisted_in_eu: bool_or_default(segment, "blacklistedInEU"),
    })
}

fn parse_flight_point(location: &Value) -> ProviderResult<FlightPoint> {
    let iata_code = require_text(location, "iataCode", "location must have an IATA code")?;
    let at = parse_datetime(require(location, "at", "location must have a timestamp")?)?;

    Ok(FlightPoint {
        iata_code,
        terminal: optional_text(location, "terminal"),
        at,
    })
}

fn parse_datetime(node: &Value) -> ProviderResult<NaiveDateTime> {
    let raw = node.as_str().unwrap_or_default();
    if raw.is_empty() {
        return Err(ProviderError::invalid_date("empty or non-string timestamp"));
    }
    raw.parse::<NaiveDateTime>()
        .map_err(|e| ProviderError::invalid_date(format!("{raw:?}: {e}")))
}

fn parse_price(price: &Value) -> ProviderResult<Price> {
    let currency = require_text(price, "currency", "price must have a currency")?;
    let total = decimal_field(price, "total", "price must have a total amount")?;
    let base = decimal_field(price, "base", "price must have a base amount")?;
    let grand_total = match price.get("grandTotal").filter(|node| !node.is_null()) {
        Some(node) => parse_decimal(node)
            .map_err(|e| ProviderError::invalid_response(format!("grandTotal: {e}")))?,
        None => total,
    };

    Ok(Price {
        total: Money::of(total, &currency),
        base: Money::of(base, &currency),
        fees: parse_fees(price.get("fees"), &currency)?,
        grand_total: Money::of(grand_total, &currency),
        currency,
    })
}

fn parse_fees(fees: Option<&Value>, currency: &str) -> ProviderResult<Vec<Fee>> {
    let Some(nodes) = fees.and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut result = Vec::with_capacity(nodes.len());
    for fee in nodes {
        let amount = decimal_field(fee, "amount", "fee must have an amount")?;
        let fee_type = require_text(fee, "type", "fee must have a type")?;
        result.push(Fee {
            amount: Money::of(amount, currency),
            fee_type,
        });
    }
    Ok(result)
}

fn parse_pricing_options(options: Option<&Value>) -> PricingOptions {
    options.map_or_else(PricingOptions::default, |node| PricingOptions {
        fare_types: string_list(node.get("fareType")),
        included_checked_bags_only: bool_or_default(node, "includedCheckedBagsOnly"),
    })
}

fn parse_traveler_pricings(
    pricings: Option<&Value>,
    diagnostics: &mut ParseDiagnostics,
) -> Vec<TravelerPricing> {
    let Some(nodes) = pricings.and_then(Value::as_array) else {
        return Vec::new();
    };

    // Parse-or-skip: one malformed entry never takes the batch down.
    let mut result = Vec::with_capacity(nodes.len());
    for pricing in nodes {
        match parse_traveler_pricing(pricing, diagnostics) {
            Ok(parsed) => result.push(parsed),
            Err(e) => diagnostics.record("traveler pricing", &e),
        }
    }
    result
}

fn parse_traveler_pricing(
    pricing: &Value,
    diagnostics: &mut ParseDiagnostics,
) -> ProviderResult<TravelerPricing> {
    let traveler_id = require_text(
        pricing,
        "travelerId",
        "traveler pricing must have a traveler ID",
    )?;
    let fare_option = require_text(
        pricing,
        "fareOption",
        "traveler pricing must have a fare option",
    )?;
    let traveler_type = require_text(
        pricing,
        "travelerType",
        "traveler pricing must have a traveler type",
    )?;
    let price = parse_price(require(
        pricing,
        "price",
        "traveler pricing must have a price",
    )?)?;
    let details = require(
        pricing,
        "fareDetailsBySegment",
        "traveler pricing must have fare details by segment",
    )?;

    Ok(TravelerPricing {
        traveler_id,
        fare_option,
        traveler_type,
        price,
        fare_details_by_segment: parse_fare_details(details, diagnostics),
    })
}

fn parse_fare_details(
    details: &Value,
    diagnostics: &mut ParseDiagnostics,
) -> Vec<FareDetailsBySegment> {
    let Some(nodes) = details.as_array() else {
        return Vec::new();
    };

    let mut result = Vec::with_capacity(nodes.len());
    for detail in nodes {
        if !detail.is_object() {
            diagnostics.record(
                "fare details by segment",
                &ProviderError::invalid_response("fare detail must be an object"),
            );
            continue;
        }
        result.push(FareDetailsBySegment {
            segment_id: text_or_default(detail, "segmentId"),
            cabin: text_or_default(detail, "cabin"),
            fare_basis: text_or_default(detail, "fareBasis"),
            class: text_or_default(detail, "class"),
            branded_fare: text_or_default(detail, "brandedFare"),
            branded_fare_label: text_or_default(detail, "brandedFareLabel"),
            included_checked_bags: parse_included_bags(detail.get("includedCheckedBags")),
            included_cabin_bags: parse_included_bags(detail.get("includedCabinBags")),
            amenities: parse_amenities(detail.get("amenities"), diagnostics),
        });
    }
    result
}

fn parse_included_bags(bags: Option<&Value>) -> IncludedBags {
    let Some(node) = bags.filter(|node| !node.is_null()) else {
        return IncludedBags::default();
    };
    IncludedBags {
        quantity: count_or_default(node, "quantity"),
        weight_unit: text_or_default(node, "weightUnit"),
        weight: count_or_default(node, "weight"),
    }
}

fn parse_amenities(amenities: Option<&Value>, diagnostics: &mut ParseDiagnostics) -> Vec<Amenity> {
    let Some(nodes) = amenities.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut result = Vec::with_capacity(nodes.len());
    for amenity in nodes {
        if !amenity.is_object() {
            diagnostics.record(
                "amenity",
                &ProviderError::invalid_response("amenity must be an object"),
            );
            continue;
        }
        result.push(Amenity {
            description: text_or_default(amenity, "description"),
            is_chargeable: bool_or_default(amenity, "isChargeable"),
            amenity_type: text_or_default(amenity, "amenityType"),
            amenity_provider: amenity
                .get("amenityProvider")
                .map(|node| text_or_default(node, "name"))
                .unwrap_or_default(),
        });
    }
    result
}

fn require<'a>(node: &'a Value, field: &str, message: &str) -> ProviderResult<&'a Value> {
    node.get(field)
        .filter(|value| !value.is_null())
        .ok_or_else(|| ProviderError::invalid_response(message))
}

fn require_text(node: &Value, field: &str, message: &str) -> ProviderResult<String> {
    let value = require(node, field, message)?;
    value
        .as_str()
        .map(str::to_owned)
        .or_else(|| value.as_u64().map(|n| n.to_string()))
        .ok_or_else(|| ProviderError::invalid_response(message))
}

fn decimal_field(node: &Value, field: &str, message: &str) -> ProviderResult<Decimal> {
    let value = require(node, field, message)?;
    parse_decimal(value).map_err(|e| ProviderError::invalid_response(format!("{field}: {e}")))
}

fn parse_decimal(node: &Value) -> Result<Decimal, String> {
    // Amounts arrive as strings; tolerate bare JSON numbers as well.
    let raw = node
        .as_str()
        .map(str::to_owned)
        .unwrap_or_else(|| node.to_string());
    raw.parse::<Decimal>()
        .map_err(|e| format!("{raw:?} is not a decimal amount: {e}"))
}

fn text_or_default(node: &Value, field: &str) -> String {
    node.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn optional_text(node: &Value, field: &str) -> Option<String> {
    node.get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn bool_or_default(node: &Value, field: &str) -> bool {
    node.get(field).and_then(Value::as_bool).unwrap_or_default()
}

fn count_or_default(node: &Value, field: &str) -> u32 {
    node.get(field)
        .and_then(Value::as_u64)
        .unwrap_or_default() as u32
}

fn string_list(node: Option<&Value>) -> Vec<String> {
    node.and_then(Value::as_array).map_or_else(Vec::new, |items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    })
}
