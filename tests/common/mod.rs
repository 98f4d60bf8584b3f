// ABOUTME: Shared test utilities: loopback mock provider servers and client construction
// ABOUTME: Each test builds an axum router for the provider endpoints it exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::HeaderMap;
use axum::routing::{post, MethodRouter};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use amadeus_flight_client::client::AmadeusClient;
use amadeus_flight_client::config::AmadeusConfig;

/// Provider auth endpoint path
pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";

/// Counters shared between a test and its mock token endpoint
#[derive(Clone, Default)]
pub struct TokenEndpoint {
    hits: Arc<AtomicUsize>,
}

impl TokenEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many credential exchanges reached the endpoint
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Route issuing a unique token per exchange with the given lifetime
    pub fn route(&self, ttl_seconds: i64) -> MethodRouter {
        self.slow_route(ttl_seconds, Duration::ZERO)
    }

    /// Like [`TokenEndpoint::route`] but each exchange takes `delay` to
    /// answer, leaving a window for tests to race against the refresh
    pub fn slow_route(&self, ttl_seconds: i64, delay: Duration) -> MethodRouter {
        let hits = Arc::clone(&self.hits);
        post(move || {
            let hits = Arc::clone(&hits);
            async move {
                let n = hits.fetch_add(1, Ordering::SeqCst) + 1;
                tokio::time::sleep(delay).await;
                Json(json!({
                    "type": "amadeusOAuth2Token",
                    "access_token": format!("test-token-{n}"),
                    "token_type": "Bearer",
                    "expires_in": ttl_seconds,
                }))
            }
        })
    }
}

/// Recorder for bearer tokens observed by a mock search endpoint
#[derive(Clone, Default)]
pub struct BearerLog {
    seen: Arc<Mutex<Vec<String>>>,
}

impl BearerLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, headers: &HeaderMap) {
        let bearer = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        self.seen.lock().unwrap().push(bearer);
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

/// Empty but well-formed flight-offer payload
pub fn empty_flight_offers_body() -> serde_json::Value {
    json!({
        "meta": { "count": 0, "links": { "self": "https://test.api/flight-offers" } },
        "data": [],
    })
}

/// Install the log subscriber once; `RUST_LOG` controls test verbosity
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Serve the router on an OS-assigned loopback port, returning the base URL
pub async fn serve(app: Router) -> String {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Client wired to a mock provider with test credentials
pub fn client_for(base_url: &str) -> AmadeusClient {
    let config = AmadeusConfig::new(base_url, "test-key", "test-secret").unwrap();
    AmadeusClient::new(config).unwrap()
}
