// ABOUTME: Immutable domain model for flight offers, locations, and search requests
// ABOUTME: Whole response graphs are owned values; nothing is shared or mutated after construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model.
//!
//! Flight-offer responses are built by [`crate::parser`] from the raw
//! payload; location responses deserialize directly since their field policy
//! is uniformly "default when absent". Monetary amounts use
//! [`rust_decimal::Decimal`] — never binary floating point.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::parser::ParseDiagnostics;

/// A monetary amount paired with its ISO 4217 currency code.
///
/// Always constructed together; an amount without its currency does not
/// exist in this model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Money {
    /// Arbitrary-precision amount
    pub amount: Decimal,
    /// ISO 4217 currency code, e.g. `EUR`
    pub currency: String,
}

impl Money {
    /// Pair an amount with its currency code
    #[must_use]
    pub fn of(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// Flight search criteria, assumed pre-validated by the caller
/// (see [`crate::validation`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOfferSearch {
    /// Origin IATA location code
    pub origin_location_code: String,
    /// Destination IATA location code
    pub destination_location_code: String,
    /// Outbound travel date
    pub departure_date: NaiveDate,
    /// Inbound travel date; `None` for one-way searches
    pub return_date: Option<NaiveDate>,
    /// Number of adult travelers, at least 1
    pub adults: u32,
    /// Number of child travelers
    pub children: u32,
    /// Number of infant travelers, at most `adults`
    pub infants: u32,
    /// Cabin class filter, e.g. `ECONOMY`
    pub travel_class: Option<String>,
    /// Restrict to direct flights when set
    pub non_stop: Option<bool>,
    /// Preferred quote currency
    pub currency_code: Option<String>,
    /// Upper price bound per traveler
    pub max_price: Option<u32>,
    /// Cap on the number of returned offers; 0 means provider default
    pub max: u32,
}

impl FlightOfferSearch {
    /// Minimal one-way search; optional criteria start absent
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: NaiveDate,
        adults: u32,
    ) -> Self {
        Self {
            origin_location_code: origin.into(),
            destination_location_code: destination.into(),
            departure_date,
            return_date: None,
            adults,
            children: 0,
            infants: 0,
            travel_class: None,
            non_stop: None,
            currency_code: None,
            max_price: None,
            max: 0,
        }
    }
}

/// Location search criteria
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSearch {
    /// Location subtype filter, e.g. `AIRPORT` or `CITY`
    pub sub_type: String,
    /// Search keyword
    pub keyword: String,
    /// ISO country code filter
    pub country_code: Option<String>,
    /// Page size; 0 means provider default
    pub page_limit: u32,
    /// Page offset
    pub page_offset: Option<u32>,
    /// Sort expression
    pub sort: Option<String>,
    /// Response view, e.g. `LIGHT` or `FULL`
    pub view: Option<String>,
}

impl LocationSearch {
    /// Search by subtype and keyword; optional criteria start absent
    #[must_use]
    pub fn new(sub_type: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            sub_type: sub_type.into(),
            keyword: keyword.into(),
            country_code: None,
            page_limit: 0,
            page_offset: None,
            sort: None,
            view: None,
        }
    }
}

/// Top-level flight-offer search result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffersResponse {
    /// Result metadata
    pub meta: Meta,
    /// Successfully parsed offers; malformed offers are dropped
    pub offers: Vec<FlightOffer>,
    /// Code-to-detail lookup tables accompanying the result
    pub dictionaries: Dictionaries,
    /// Elements dropped during parsing, for observability
    #[serde(skip)]
    pub diagnostics: ParseDiagnostics,
}

/// Result metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Number of offers the provider reported
    pub count: u64,
    /// Self link for the result page
    pub link: String,
}

/// One priced flight itinerary option
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    /// Provider-assigned offer id
    pub id: String,
    /// GDS source, e.g. `GDS`
    pub source: String,
    /// Whether ticketing must happen at booking time
    pub instant_ticketing_required: bool,
    /// Whether segments are operated under differing fare owners
    pub non_homogeneous: bool,
    /// Whether the offer covers only the outbound leg
    pub one_way: bool,
    /// Last date the offer can be ticketed
    pub last_ticketing_date: Option<String>,
    /// Seats remaining at this price
    pub number_of_bookable_seats: u32,
    /// Ordered travel legs
    pub itineraries: Vec<Itinerary>,
    /// Offer-level price
    pub price: Price,
    /// Fare type flags
    pub pricing_options: PricingOptions,
    /// Airlines validating the ticket
    pub validating_airline_codes: Vec<String>,
    /// Per-traveler fare breakdown
    pub traveler_pricings: Vec<TravelerPricing>,
}

/// One travel leg of an offer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// ISO 8601 duration of the leg
    pub duration: String,
    /// Flight segments in travel order
    pub segments: Vec<Segment>,
}

/// One flight segment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Departure point and time
    pub departure: FlightPoint,
    /// Arrival point and time
    pub arrival: FlightPoint,
    /// Marketing carrier code
    pub carrier_code: String,
    /// Flight number
    pub number: String,
    /// Aircraft type, when reported
    pub aircraft: Option<Aircraft>,
    /// Operating carrier, when it differs from the marketing carrier
    pub operating: Option<Operating>,
    /// ISO 8601 duration of the segment
    pub duration: String,
    /// Segment id referenced by fare details
    pub id: String,
    /// Technical stops on the segment
    pub number_of_stops: u32,
    /// Whether the operating carrier is EU-blacklisted
    pub blacklisted_in_eu: bool,
}

/// Departure or arrival point of a segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPoint {
    /// IATA location code
    pub iata_code: String,
    /// Terminal, when reported
    pub terminal: Option<String>,
    /// Local departure/arrival time; ordering of an itinerary depends on it
    pub at: NaiveDateTime,
}

/// Aircraft equipment code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    /// IATA aircraft type code
    pub code: String,
}

/// Operating carrier of a segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operating {
    /// Operating carrier code
    pub carrier_code: String,
}

/// Price block for an offer or a traveler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Quote currency for every amount in this block
    pub currency: String,
    /// Total including taxes
    pub total: Money,
    /// Base fare
    pub base: Money,
    /// Itemized fees
    pub fees: Vec<Fee>,
    /// Total including fees; equals `total` when the provider omits it
    pub grand_total: Money,
}

/// One fee line of a price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    /// Fee amount in the price currency
    pub amount: Money,
    /// Fee type, e.g. `SUPPLIER`
    pub fee_type: String,
}

/// Fare type flags for an offer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOptions {
    /// Fare types included in the quote
    pub fare_types: Vec<String>,
    /// Whether only fares with included checked bags were quoted
    pub included_checked_bags_only: bool,
}

/// Per-traveler fare breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerPricing {
    /// Traveler id within the offer
    pub traveler_id: String,
    /// Fare option, e.g. `STANDARD`
    pub fare_option: String,
    /// Traveler type, e.g. `ADULT`
    pub traveler_type: String,
    /// Price for this traveler
    pub price: Price,
    /// Fare details per segment
    pub fare_details_by_segment: Vec<FareDetailsBySegment>,
}

/// Fare details for one traveler on one segment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareDetailsBySegment {
    /// Segment id this detail applies to
    pub segment_id: String,
    /// Cabin, e.g. `ECONOMY`
    pub cabin: String,
    /// Fare basis code
    pub fare_basis: String,
    /// Booking class
    pub class: String,
    /// Branded fare code
    pub branded_fare: String,
    /// Branded fare display label
    pub branded_fare_label: String,
    /// Checked baggage allowance
    pub included_checked_bags: IncludedBags,
    /// Cabin baggage allowance
    pub included_cabin_bags: IncludedBags,
    /// Cabin amenities
    pub amenities: Vec<Amenity>,
}

/// Baggage allowance; zeros and empty unit when the provider omits it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludedBags {
    /// Number of included pieces
    pub quantity: u32,
    /// Weight unit, e.g. `KG`
    pub weight_unit: String,
    /// Included weight in `weight_unit`
    pub weight: u32,
}

/// One cabin amenity of a fare
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    /// Amenity description
    pub description: String,
    /// Whether the amenity costs extra
    pub is_chargeable: bool,
    /// Amenity category, e.g. `BAGGAGE`
    pub amenity_type: String,
    /// Name of the amenity provider
    pub amenity_provider: String,
}

/// Code-to-detail lookup tables accompanying a flight-offer result.
///
/// Always present: an absent upstream `dictionaries` object yields four
/// empty maps so callers never branch on presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionaries {
    /// IATA code to city/country
    pub locations: HashMap<String, DictionaryLocation>,
    /// Aircraft type code to name
    pub aircraft: HashMap<String, String>,
    /// Currency code to name
    pub currencies: HashMap<String, String>,
    /// Carrier code to name
    pub carriers: HashMap<String, String>,
}

/// One entry of the locations dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryLocation {
    /// City the location belongs to
    pub city_code: String,
    /// Country the location belongs to
    pub country_code: String,
}

/// Location search result page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationsResponse {
    /// Result metadata
    #[serde(default)]
    pub meta: LocationsMeta,
    /// Matching locations
    #[serde(default)]
    pub data: Vec<Location>,
}

/// Metadata of a location result page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationsMeta {
    /// Number of matches the provider reported
    #[serde(default)]
    pub count: u64,
    /// Navigation links for the result page
    #[serde(default)]
    pub links: Option<LocationLinks>,
}

/// Navigation links of a location result page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationLinks {
    /// Link to this page
    #[serde(default)]
    pub href: Option<String>,
    /// HTTP methods accepted on `href`
    #[serde(default)]
    pub methods: Option<Vec<String>>,
}

/// One location record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Provider-assigned id
    #[serde(default)]
    pub id: Option<String>,
    /// Resource type, e.g. `location`
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
    /// Subtype, e.g. `AIRPORT`
    #[serde(default)]
    pub sub_type: Option<String>,
    /// Short name
    #[serde(default)]
    pub name: Option<String>,
    /// Name qualified with region/country
    #[serde(default)]
    pub detailed_name: Option<String>,
    /// UTC offset at the location
    #[serde(default)]
    pub time_zone_offset: Option<String>,
    /// IATA code
    #[serde(default)]
    pub iata_code: Option<String>,
    /// Coordinates
    #[serde(default)]
    pub geo_code: Option<GeoCode>,
    /// Postal address details
    #[serde(default)]
    pub address: Option<Address>,
    /// Distance from the search point
    #[serde(default)]
    pub distance: Option<Distance>,
    /// Traveler traffic analytics
    #[serde(default)]
    pub analytics: Option<Analytics>,
    /// Search relevance score
    #[serde(default)]
    pub relevance: Option<f64>,
    /// Category tag
    #[serde(default)]
    pub category: Option<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Provider ranking
    #[serde(default)]
    pub rank: Option<String>,
}

/// WGS84 coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCode {
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: f64,
}

/// Postal address of a location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// City name
    #[serde(default)]
    pub city_name: Option<String>,
    /// City IATA code
    #[serde(default)]
    pub city_code: Option<String>,
    /// Country name
    #[serde(default)]
    pub country_name: Option<String>,
    /// ISO country code
    #[serde(default)]
    pub country_code: Option<String>,
    /// Region code
    #[serde(default)]
    pub region_code: Option<String>,
}

/// Distance from the search point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distance {
    /// Distance value
    #[serde(default)]
    pub value: f64,
    /// Distance unit, e.g. `KM`
    #[serde(default)]
    pub unit: Option<String>,
}

/// Traveler traffic analytics for a location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Traveler volume score
    #[serde(default)]
    pub travelers: Option<Travelers>,
}

/// Traveler volume score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Travelers {
    /// Relative traffic score, 0-100
    #[serde(default)]
    pub score: u32,
}
