// ABOUTME: Resolver for the provider's code-to-detail dictionary tables
// ABOUTME: Absent dictionaries yield four empty maps, never an option
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dictionary resolution.
//!
//! A flight-offer response carries four lookup tables keyed by code:
//! locations, aircraft, currencies, and carriers. They expand the codes
//! referenced by the offers into human-readable detail. Callers never branch
//! on presence: an absent or null `dictionaries` object resolves to four
//! empty maps.

use std::collections::HashMap;

use serde_json::Value;

use crate::models::{Dictionaries, DictionaryLocation};

/// Resolve the `dictionaries` node of a flight-offer payload.
///
/// Location entries tolerate missing `cityCode`/`countryCode` sub-fields,
/// defaulting them to `""` like other optional strings.
#[must_use]
pub fn resolve(dictionaries: Option<&Value>) -> Dictionaries {
    let Some(node) = dictionaries.filter(|value| !value.is_null()) else {
        return Dictionaries::default();
    };

    Dictionaries {
        locations: resolve_locations(node.get("locations")),
        aircraft: resolve_code_map(node.get("aircraft")),
        currencies: resolve_code_map(node.get("currencies")),
        carriers: resolve_code_map(node.get("carriers")),
    }
}

fn resolve_locations(locations: Option<&Value>) -> HashMap<String, DictionaryLocation> {
    locations
        .and_then(Value::as_object)
        .map_or_else(HashMap::new, |entries| {
            entries
                .iter()
                .map(|(code, detail)| {
                    (
                        code.clone(),
                        DictionaryLocation {
                            city_code: text_field(detail, "cityCode"),
                            country_code: text_field(detail, "countryCode"),
                        },
                    )
                })
                .collect()
        })
}

fn resolve_code_map(table: Option<&Value>) -> HashMap<String, String> {
    table
        .and_then(Value::as_object)
        .map_or_else(HashMap::new, |entries| {
            entries
                .iter()
                .map(|(code, name)| (code.clone(), name.as_str().unwrap_or_default().to_owned()))
                .collect()
        })
}

fn text_field(node: &Value, field: &str) -> String {
    node.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}
