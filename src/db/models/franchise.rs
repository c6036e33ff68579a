//! Franchise and store models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A franchisee attached to a franchise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FranchiseAdmin {
    pub id: u32,
    pub name: String,
    /// Every other field the admin was submitted with (`email` and so on).
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: u64,
    pub name: String,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
}

/// A franchise owns its stores; insertion order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Franchise {
    pub id: u64,
    pub name: String,
    pub admins: Vec<FranchiseAdmin>,
    pub stores: Vec<Store>,
}

/// Admins stay raw objects so that unknown fields survive creation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateFranchiseRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub admins: Option<Vec<Map<String, Value>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateStoreRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct FranchiseListResponse {
    pub franchises: Vec<Franchise>,
    pub more: bool,
}
