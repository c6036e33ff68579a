//! Menu, order history and order placement under `/api/order`.

use serde_json::{Map, Value};
use tracing::info;

use super::dispatch::{MockRequest, MockResponse, RouteParams};
use super::error::ApiError;
use crate::db::{
    menu as static_menu, order_history as canned_orders, DinerRef, OrderHistory, PlacedOrder,
    Simulator,
};

/// GET /api/order/menu
pub fn menu(
    _sim: &mut Simulator,
    _request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    MockResponse::ok(&static_menu())
}

/// GET /api/order
///
/// Every diner sees the same single historical order.
pub fn order_history(
    sim: &mut Simulator,
    _request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    let diner_id = match sim.session.user_id() {
        Some(id) => DinerRef::User(id.to_string()),
        None => DinerRef::Anonymous(0),
    };

    MockResponse::ok(&OrderHistory {
        diner_id,
        orders: canned_orders(),
        page: 1,
    })
}

/// POST /api/order
///
/// Echoes the submitted order with a fixed id, plus a fixed token standing
/// in for the payment receipt.
pub fn place_order(
    sim: &mut Simulator,
    request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    let mut order = match &request.body {
        Value::Object(fields) => fields.clone(),
        _ => Map::new(),
    };
    let order_id = sim.settings().order_id;
    order.insert("id".to_string(), Value::from(order_id));

    info!(
        order_id,
        user_id = sim.session.user_id(),
        "Order placed"
    );

    MockResponse::ok(&PlacedOrder {
        order: Value::Object(order),
        jwt: sim.settings().order_token.clone(),
    })
}
