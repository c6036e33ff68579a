//! Menu and order models.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u32,
    pub title: String,
    pub image: String,
    pub price: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_id: u32,
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub franchise_id: u64,
    pub store_id: u64,
    pub date: String,
    pub items: Vec<OrderItem>,
}

/// Who the order history belongs to: the session user's id, or `0`
/// when nobody is logged in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DinerRef {
    User(String),
    Anonymous(u8),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistory {
    pub diner_id: DinerRef,
    pub orders: Vec<Order>,
    pub page: u32,
}

/// Echo of a placed order. `order` is the submitted body plus an `id`.
#[derive(Debug, Serialize)]
pub struct PlacedOrder {
    pub order: serde_json::Value,
    pub jwt: String,
}
