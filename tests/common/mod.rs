//! Shared helpers for the simulator integration tests.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use pizza_mock::api::create_router;
use pizza_mock::api::dispatch::{dispatch, Dispatch, MockRequest, MockResponse};
use pizza_mock::config::{Config, SimulatorConfig};
use pizza_mock::{AppState, Simulator};

/// Fixed seed so franchise admin ids are reproducible.
pub const TEST_SEED: u64 = 0x5eed;

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.simulator = SimulatorConfig {
        rng_seed: Some(TEST_SEED),
        ..SimulatorConfig::default()
    };
    config
}

/// A freshly seeded simulator.
pub fn simulator() -> Simulator {
    Simulator::new(&test_config().simulator)
}

/// Dispatch a request that the simulator is expected to answer.
pub fn send(sim: &mut Simulator, method: Method, url: &str, body: Value) -> MockResponse {
    let request = MockRequest::new(method, url).unwrap().with_body(body);
    match dispatch(sim, &request) {
        Dispatch::Fulfilled(response) => response,
        Dispatch::PassThrough => panic!("{url} unexpectedly passed through"),
    }
}

pub fn login(sim: &mut Simulator, email: &str, password: &str) -> MockResponse {
    send(
        sim,
        Method::PUT,
        "/api/auth",
        serde_json::json!({ "email": email, "password": password }),
    )
}

/// Names from a `{users: [...]}` body.
pub fn user_names(body: &Value) -> Vec<String> {
    body["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap().to_string())
        .collect()
}

/// Create a test app around the given config.
pub fn create_test_app(config: Config) -> axum::Router {
    let state = Arc::new(AppState::new(config).unwrap());
    create_router(state)
}

/// Send a request through the router and return status, headers and JSON body.
pub async fn call(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::json!({ "raw_body": String::from_utf8_lossy(&bytes).to_string() })
        })
    };

    (status, headers, json)
}
