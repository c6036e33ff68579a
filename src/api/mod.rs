pub mod auth;
pub mod dispatch;
pub mod error;
pub mod franchises;
pub mod guard;
pub mod orders;
pub mod passthrough;
pub mod users;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use dispatch::{dispatch, Dispatch, MockRequest};

pub fn create_router(state: Arc<AppState>) -> Router {
    // Control routes for the harness, outside the simulated /api surface
    let control_routes = Router::new()
        .route("/health", get(health))
        .route("/reset", post(reset));

    let router = Router::new()
        .nest("/__mock", control_routes)
        .fallback(simulate)
        .layer(TraceLayer::new_for_http());

    let router = if state.config.server.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

/// Every request outside `/__mock` goes through the dispatcher.
async fn simulate(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = MockRequest {
        method: method.clone(),
        uri: uri.clone(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };

    // One handler runs to completion before the next one starts
    let outcome = {
        let mut sim = state.simulator.lock();
        dispatch(&mut sim, &request)
    };

    match outcome {
        Dispatch::Fulfilled(response) => response.into_response(),
        Dispatch::PassThrough => match &state.passthrough {
            Some(upstream) => upstream
                .forward(method, &uri, &headers, body)
                .await
                .unwrap_or_else(|err| err.into_response()),
            None => passthrough::not_mocked(),
        },
    }
}

/// GET /__mock/health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /__mock/reset
///
/// Drop all state and reload the fixtures.
async fn reset(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.reset();
    info!("Simulator reset to fixtures");
    Json(json!({ "message": "simulator reset" }))
}
