// ABOUTME: Tests for defensive flight-offer parsing: required fields, defaults, parse-or-skip
// ABOUTME: One malformed element is dropped and diagnosed while the rest of the payload succeeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use rust_decimal::Decimal;
use serde_json::{json, Value};

use amadeus_flight_client::errors::ProviderError;
use amadeus_flight_client::parser::parse_flight_offers;

/// A complete, well-formed offer the individual tests mutate
fn valid_offer(id: &str) -> Value {
    json!({
        "type": "flight-offer",
        "id": id,
        "source": "GDS",
        "instantTicketingRequired": false,
        "nonHomogeneous": false,
        "oneWay": false,
        "lastTicketingDate": "2026-03-10",
        "numberOfBookableSeats": 4,
        "itineraries": [
            {
                "duration": "PT8H35M",
                "segments": [
                    {
                        "departure": { "iataCode": "MAD", "terminal": "4", "at": "2026-03-14T12:35:00" },
                        "arrival": { "iataCode": "JFK", "terminal": "8", "at": "2026-03-14T15:10:00" },
                        "carrierCode": "IB",
                        "number": "6253",
                        "aircraft": { "code": "359" },
                        "operating": { "carrierCode": "IB" },
                        "duration": "PT8H35M",
                        "id": "1",
                        "numberOfStops": 0,
                        "blacklistedInEU": false
                    }
                ]
            }
        ],
        "price": {
            "currency": "EUR",
            "total": "485.70",
            "base": "320.00",
            "fees": [ { "amount": "0.00", "type": "SUPPLIER" } ],
            "grandTotal": "485.70"
        },
        "pricingOptions": { "fareType": ["PUBLISHED"], "includedCheckedBagsOnly": true },
        "validatingAirlineCodes": ["IB"],
        "travelerPricings": [
            {
                "travelerId": "1",
                "fareOption": "STANDARD",
                "travelerType": "ADULT",
                "price": { "currency": "EUR", "total": "485.70", "base": "320.00" },
                "fareDetailsBySegment": [
                    {
                        "segmentId": "1",
                        "cabin": "ECONOMY",
                        "fareBasis": "QNNNA4B9",
                        "class": "Q",
                        "brandedFare": "NOBAG",
                        "brandedFareLabel": "BASIC",
                        "includedCheckedBags": { "quantity": 0 },
                        "amenities": [
                            {
                                "description": "CHECKED BAG 1PC",
                                "isChargeable": true,
                                "amenityType": "BAGGAGE",
                                "amenityProvider": { "name": "BrandedFare" }
                            }
                        ]
                    }
                ]
            }
        ]
    })
}

fn body_with(offers: Vec<Value>) -> String {
    json!({
        "meta": { "count": offers.len(), "links": { "self": "https://test.api/flight-offers" } },
        "data": offers,
        "dictionaries": {
            "locations": {
                "MAD": { "cityCode": "MAD", "countryCode": "ES" },
                "JFK": { "cityCode": "NYC", "countryCode": "US" }
            },
            "aircraft": { "359": "AIRBUS A350-900" },
            "currencies": { "EUR": "EURO" },
            "carriers": { "IB": "IBERIA" }
        }
    })
    .to_string()
}

#[test]
fn well_formed_payload_parses_completely() -> anyhow::Result<()> {
    let response = parse_flight_offers(&body_with(vec![valid_offer("1")]))?;

    assert_eq!(response.meta.count, 1);
    assert!(response.diagnostics.is_clean());
    assert_eq!(response.offers.len(), 1);

    let offer = &response.offers[0];
    assert_eq!(offer.id, "1");
    assert_eq!(offer.source, "GDS");
    assert_eq!(offer.number_of_bookable_seats, 4);
    assert_eq!(offer.price.total.amount, Decimal::new(48_570, 2));
    assert_eq!(offer.price.total.currency, "EUR");
    assert_eq!(offer.itineraries[0].segments[0].departure.iata_code, "MAD");
    assert_eq!(offer.traveler_pricings.len(), 1);
    assert_eq!(
        offer.traveler_pricings[0].fare_details_by_segment[0].amenities[0].amenity_provider,
        "BrandedFare"
    );
    assert_eq!(response.dictionaries.carriers["IB"], "IBERIA");
    assert_eq!(response.dictionaries.locations["JFK"].city_code, "NYC");
    Ok(())
}

#[test]
fn offer_missing_price_is_dropped_others_survive() {
    let mut broken = valid_offer("2");
    broken.as_object_mut().unwrap().remove("price");

    let response =
        parse_flight_offers(&body_with(vec![valid_offer("1"), broken, valid_offer("3")])).unwrap();

    let ids: Vec<&str> = response.offers.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(response.diagnostics.dropped().len(), 1);
    assert_eq!(response.diagnostics.dropped()[0].context, "flight offer");
    assert!(response.diagnostics.dropped()[0].reason.contains("price"));
}

#[test]
fn unparseable_departure_timestamp_drops_the_offer() {
    let mut broken = valid_offer("2");
    broken["itineraries"][0]["segments"][0]["departure"]["at"] = json!("not-a-date");

    let response = parse_flight_offers(&body_with(vec![valid_offer("1"), broken])).unwrap();

    assert_eq!(response.offers.len(), 1);
    assert_eq!(response.offers[0].id, "1");
    assert_eq!(response.diagnostics.dropped().len(), 1);
    assert!(response.diagnostics.dropped()[0]
        .reason
        .contains("not-a-date"));
}

#[test]
fn missing_grand_total_defaults_to_total() {
    let mut offer = valid_offer("1");
    offer["price"].as_object_mut().unwrap().remove("grandTotal");
    offer["price"]["total"] = json!("123.45");

    let response = parse_flight_offers(&body_with(vec![offer])).unwrap();
    let price = &response.offers[0].price;
    assert_eq!(price.grand_total.amount, Decimal::new(12_345, 2));
    assert_eq!(price.grand_total, price.total);
}

#[test]
fn optional_fields_take_documented_defaults() {
    let offer = json!({
        "id": "1",
        "source": "GDS",
        "itineraries": [
            {
                "duration": "PT2H",
                "segments": [
                    {
                        "departure": { "iataCode": "MAD", "at": "2026-03-14T12:35:00" },
                        "arrival": { "iataCode": "LIS", "at": "2026-03-14T13:35:00" },
                        "carrierCode": "IB",
                        "number": "3110"
                    }
                ]
            }
        ],
        "price": { "currency": "EUR", "total": "80.00", "base": "60.00" },
        "travelerPricings": [
            {
                "travelerId": "1",
                "fareOption": "STANDARD",
                "travelerType": "ADULT",
                "price": { "currency": "EUR", "total": "80.00", "base": "60.00" },
                "fareDetailsBySegment": [ { "segmentId": "1" } ]
            }
        ]
    });

    let response = parse_flight_offers(&body_with(vec![offer])).unwrap();
    assert!(response.diagnostics.is_clean());

    let parsed = &response.offers[0];
    assert!(!parsed.instant_ticketing_required);
    assert!(!parsed.one_way);
    assert_eq!(parsed.number_of_bookable_seats, 0);
    assert_eq!(parsed.last_ticketing_date, None);
    assert!(parsed.validating_airline_codes.is_empty());
    assert!(parsed.pricing_options.fare_types.is_empty());
    assert!(!parsed.pricing_options.included_checked_bags_only);
    assert!(parsed.price.fees.is_empty());

    let segment = &parsed.itineraries[0].segments[0];
    assert_eq!(segment.aircraft, None);
    assert_eq!(segment.operating, None);
    assert_eq!(segment.duration, "");
    assert_eq!(segment.number_of_stops, 0);
    assert!(!segment.blacklisted_in_eu);

    let detail = &parsed.traveler_pricings[0].fare_details_by_segment[0];
    assert_eq!(detail.cabin, "");
    assert_eq!(detail.included_checked_bags.quantity, 0);
    assert_eq!(detail.included_checked_bags.weight_unit, "");
    assert_eq!(detail.included_cabin_bags.weight, 0);
    assert!(detail.amenities.is_empty());
}

#[test]
fn malformed_traveler_pricing_entry_is_skipped() {
    let mut offer = valid_offer("1");
    let pricings = offer["travelerPricings"].as_array_mut().unwrap();
    pricings.push(json!({ "travelerId": "2", "fareOption": "STANDARD" }));

    let response = parse_flight_offers(&body_with(vec![offer])).unwrap();

    let parsed = &response.offers[0];
    assert_eq!(parsed.traveler_pricings.len(), 1);
    assert_eq!(parsed.traveler_pricings[0].traveler_id, "1");
    assert_eq!(response.diagnostics.dropped().len(), 1);
    assert_eq!(response.diagnostics.dropped()[0].context, "traveler pricing");
}

#[test]
fn malformed_fare_detail_entry_is_skipped() {
    let mut offer = valid_offer("1");
    offer["travelerPricings"][0]["fareDetailsBySegment"]
        .as_array_mut()
        .unwrap()
        .push(json!("not-an-object"));

    let response = parse_flight_offers(&body_with(vec![offer])).unwrap();

    let details = &response.offers[0].traveler_pricings[0].fare_details_by_segment;
    assert_eq!(details.len(), 1);
    assert_eq!(
        response.diagnostics.dropped()[0].context,
        "fare details by segment"
    );
}

#[test]
fn absent_dictionaries_resolve_to_empty_maps() {
    let body = json!({
        "meta": { "count": 0, "links": { "self": "" } },
        "data": [],
    })
    .to_string();

    let response = parse_flight_offers(&body).unwrap();
    assert!(response.dictionaries.locations.is_empty());
    assert!(response.dictionaries.aircraft.is_empty());
    assert!(response.dictionaries.currencies.is_empty());
    assert!(response.dictionaries.carriers.is_empty());
}

#[test]
fn missing_data_array_aborts_the_call() {
    let body = json!({ "meta": { "count": 0 } }).to_string();
    match parse_flight_offers(&body) {
        Err(ProviderError::InvalidResponse { message }) => {
            assert!(message.contains("data"));
        }
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}

#[test]
fn missing_meta_count_aborts_the_call() {
    let body = json!({ "meta": {}, "data": [] }).to_string();
    assert!(matches!(
        parse_flight_offers(&body),
        Err(ProviderError::InvalidResponse { .. })
    ));
}

#[test]
fn non_json_body_is_a_parse_error() {
    assert!(matches!(
        parse_flight_offers("<html>gateway error</html>"),
        Err(ProviderError::Parse { .. })
    ));
}

#[test]
fn numeric_amounts_are_tolerated() {
    let mut offer = valid_offer("1");
    offer["price"]["total"] = json!(485.70);
    offer["price"]["grandTotal"] = json!(485.70);

    let response = parse_flight_offers(&body_with(vec![offer])).unwrap();
    assert_eq!(
        response.offers[0].price.total.amount,
        Decimal::new(4857, 1)
    );
}
