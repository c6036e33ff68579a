//! Franchise and store management under `/api/franchise`.
//!
//! Creating and listing franchises is deliberately unguarded, unlike the
//! user list. Storefront tests depend on that, so it stays permissive.

use serde_json::Value;
use tracing::{debug, info};

use super::dispatch::{MockRequest, MockResponse, RouteParams};
use super::error::ApiError;
use super::guard;
use crate::db::{
    CreateFranchiseRequest, CreateStoreRequest, FranchiseAdmin, FranchiseListResponse,
    MessageResponse, Simulator,
};

/// Name given to franchise admins created without one.
pub const DEFAULT_ADMIN_NAME: &str = "New Admin";

/// POST /api/franchise
///
/// Each listed admin keeps every submitted field, gets a random id and,
/// when unnamed, a placeholder name.
pub fn create_franchise(
    sim: &mut Simulator,
    request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    let req: CreateFranchiseRequest = request.json();

    let admins = req
        .admins
        .unwrap_or_default()
        .into_iter()
        .map(|mut details| {
            let name = match details.remove("name") {
                Some(Value::String(name)) if !name.is_empty() => name,
                _ => DEFAULT_ADMIN_NAME.to_string(),
            };
            details.remove("id");
            FranchiseAdmin {
                id: sim.random_admin_id(),
                name,
                details,
            }
        })
        .collect();

    let franchise = sim
        .catalog
        .create_franchise(req.name.unwrap_or_default(), admins);
    info!(franchise_id = franchise.id, name = %franchise.name, "Franchise created");
    MockResponse::ok(franchise)
}

/// GET /api/franchise
///
/// The whole catalog as a single page.
pub fn list_franchises(
    sim: &mut Simulator,
    _request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    debug!(count = sim.catalog.len(), "Listing franchises");
    MockResponse::ok(&FranchiseListResponse {
        franchises: sim.catalog.franchises().to_vec(),
        more: false,
    })
}

/// POST /api/franchise/:fid/store
pub fn create_store(
    sim: &mut Simulator,
    request: &MockRequest,
    params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    let req: CreateStoreRequest = request.json();

    let franchise_id = params.id(0);
    let store = franchise_id
        .and_then(|id| sim.catalog.create_store(id, req.name))
        .ok_or_else(|| ApiError::not_found("franchise not found"))?;

    info!(franchise_id, store_id = store.id, "Store created");
    MockResponse::ok(&store)
}

/// DELETE /api/franchise/:fid/store/:sid
///
/// Succeeds whether or not the store exists.
pub fn delete_store(
    sim: &mut Simulator,
    _request: &MockRequest,
    params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    if let (Some(franchise_id), Some(store_id)) = (params.id(0), params.id(1)) {
        if sim.catalog.remove_store(franchise_id, store_id) {
            info!(franchise_id, store_id, "Store deleted");
        }
    }
    MockResponse::ok(&MessageResponse::new("store deleted"))
}

/// DELETE /api/franchise/:fid
///
/// The id is the last path segment. Anything that does not name an
/// existing franchise (`/api/franchise/1/store`, an oversized id) is a
/// successful no-op.
pub fn delete_franchise(
    sim: &mut Simulator,
    request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    let franchise_id = request
        .path()
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u64>().ok());

    if let Some(franchise_id) = franchise_id {
        if sim.catalog.remove_franchise(franchise_id) {
            info!(franchise_id, "Franchise deleted");
        }
    }
    MockResponse::ok(&MessageResponse::new("franchise deleted"))
}

/// GET /api/franchise/:userId
///
/// Admins see the whole catalog and everyone else sees nothing. The path
/// id is not consulted.
pub fn user_franchises(
    sim: &mut Simulator,
    _request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    if guard::is_admin(sim.current_user()) {
        MockResponse::ok(&sim.catalog.franchises())
    } else {
        MockResponse::ok(&Vec::<()>::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dispatch::{dispatch, Dispatch};
    use crate::config::SimulatorConfig;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    fn sim() -> Simulator {
        Simulator::new(&SimulatorConfig {
            rng_seed: Some(7),
            ..SimulatorConfig::default()
        })
    }

    fn send(sim: &mut Simulator, method: Method, url: &str, body: Value) -> MockResponse {
        let request = MockRequest::new(method, url).unwrap().with_body(body);
        match dispatch(sim, &request) {
            Dispatch::Fulfilled(response) => response,
            Dispatch::PassThrough => panic!("{url} was not mocked"),
        }
    }

    fn franchise_names(sim: &mut Simulator) -> Vec<String> {
        let response = send(sim, Method::GET, "/api/franchise", Value::Null);
        response.body["franchises"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_list_franchises() {
        let mut sim = sim();
        let response = send(&mut sim, Method::GET, "/api/franchise?page=0&limit=10&name=*", Value::Null);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["more"], false);
        assert_eq!(response.body["franchises"][0]["stores"][0]["totalRevenue"], 0.1);
        assert_eq!(
            franchise_names(&mut sim),
            vec!["pizzaPocket", "LotaPizza", "PizzaCorp", "topSpot"]
        );
    }

    #[test]
    fn test_create_franchise_assigns_ids() {
        let mut sim = sim();
        let response = send(
            &mut sim,
            Method::POST,
            "/api/franchise",
            json!({ "name": "pizzaHut", "admins": [{ "email": "f@jwt.com" }] }),
        );

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["id"], 5);
        assert_eq!(response.body["stores"], json!([]));

        let admin = &response.body["admins"][0];
        assert_eq!(admin["name"], DEFAULT_ADMIN_NAME);
        assert_eq!(admin["email"], "f@jwt.com");
        assert!(admin["id"].as_u64().unwrap() < 1000);

        assert_eq!(franchise_names(&mut sim).last().unwrap(), "pizzaHut");
    }

    #[test]
    fn test_create_franchise_without_admins() {
        let mut sim = sim();
        let response = send(&mut sim, Method::POST, "/api/franchise", json!({ "name": "solo" }));
        assert_eq!(response.body["admins"], json!([]));
    }

    #[test]
    fn test_create_franchise_keeps_submitted_admin_fields() {
        let mut sim = sim();
        let response = send(
            &mut sim,
            Method::POST,
            "/api/franchise",
            json!({
                "name": "pizzaPhone",
                "admins": [{ "email": "f@jwt.com", "phone": "555", "id": "ignored" }]
            }),
        );

        let admin = &response.body["admins"][0];
        assert_eq!(admin["email"], "f@jwt.com");
        assert_eq!(admin["phone"], "555");
        assert_eq!(admin["name"], DEFAULT_ADMIN_NAME);
        assert!(admin["id"].as_u64().unwrap() < 1000);

        let stored = &sim.catalog.get(5).unwrap().admins[0];
        assert_eq!(stored.details["phone"], "555");
        assert!(!stored.details.contains_key("id"));
    }

    #[test]
    fn test_create_franchise_with_null_name_keeps_admins() {
        let mut sim = sim();
        let response = send(
            &mut sim,
            Method::POST,
            "/api/franchise",
            json!({ "name": null, "admins": [{ "name": "Pat", "email": "pat@jwt.com" }] }),
        );

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["name"], "");
        assert_eq!(response.body["admins"][0]["name"], "Pat");
        assert_eq!(response.body["admins"][0]["email"], "pat@jwt.com");
    }

    #[test]
    fn test_oversized_ids_are_missing_records() {
        let mut sim = sim();
        let before = sim.catalog.franchises().to_vec();

        let franchise = send(
            &mut sim,
            Method::DELETE,
            "/api/franchise/99999999999999999999999",
            Value::Null,
        );
        assert_eq!(franchise.status, StatusCode::OK);
        assert_eq!(franchise.body, json!({ "message": "franchise deleted" }));

        let store = send(
            &mut sim,
            Method::DELETE,
            "/api/franchise/1/store/99999999999999999999999",
            Value::Null,
        );
        assert_eq!(store.status, StatusCode::OK);
        assert_eq!(store.body, json!({ "message": "store deleted" }));

        let created = send(
            &mut sim,
            Method::POST,
            "/api/franchise/99999999999999999999999/store",
            json!({ "name": "Provo" }),
        );
        assert_eq!(created.status, StatusCode::NOT_FOUND);
        assert_eq!(created.body, json!({ "message": "franchise not found" }));

        assert_eq!(sim.catalog.franchises(), before.as_slice());
        assert_eq!(sim.catalog.next_store_id(), 8);
    }

    #[test]
    fn test_delete_under_franchise_prefix_is_noop() {
        let mut sim = sim();
        let before = sim.catalog.franchises().to_vec();

        let response = send(&mut sim, Method::DELETE, "/api/franchise/1/store", Value::Null);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "message": "franchise deleted" }));
        assert_eq!(sim.catalog.franchises(), before.as_slice());
    }

    #[test]
    fn test_delete_franchise_uses_last_segment() {
        let mut sim = sim();
        send(&mut sim, Method::DELETE, "/api/franchise/1/extra/3", Value::Null);
        assert!(sim.catalog.get(3).is_none());
        assert!(sim.catalog.get(1).is_some());
    }

    #[test]
    fn test_create_store() {
        let mut sim = sim();
        let response = send(
            &mut sim,
            Method::POST,
            "/api/franchise/4/store",
            json!({ "name": "Provo" }),
        );
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "id": 8, "name": "Provo", "totalRevenue": 0.0 }));
        assert_eq!(sim.catalog.get(4).unwrap().stores.len(), 1);
    }

    #[test]
    fn test_create_store_missing_franchise() {
        let mut sim = sim();
        let response = send(
            &mut sim,
            Method::POST,
            "/api/franchise/99/store",
            json!({ "name": "Provo" }),
        );
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, json!({ "message": "franchise not found" }));
    }

    #[test]
    fn test_delete_store_leaves_siblings() {
        let mut sim = sim();
        let response = send(&mut sim, Method::DELETE, "/api/franchise/2/store/5", Value::Null);
        assert_eq!(response.body, json!({ "message": "store deleted" }));

        let stores: Vec<u64> = sim.catalog.get(2).unwrap().stores.iter().map(|s| s.id).collect();
        assert_eq!(stores, vec![4, 6]);
        assert_eq!(sim.catalog.get(1).unwrap().stores.len(), 1);
        assert_eq!(sim.catalog.get(3).unwrap().stores.len(), 1);
    }

    #[test]
    fn test_delete_franchise() {
        let mut sim = sim();
        let response = send(&mut sim, Method::DELETE, "/api/franchise/2", Value::Null);
        assert_eq!(response.body, json!({ "message": "franchise deleted" }));
        assert_eq!(franchise_names(&mut sim), vec!["pizzaPocket", "PizzaCorp", "topSpot"]);

        let again = send(&mut sim, Method::DELETE, "/api/franchise/2", Value::Null);
        assert_eq!(again.status, StatusCode::OK);
        assert_eq!(sim.catalog.len(), 3);
    }

    #[test]
    fn test_user_franchises_depends_on_role_only() {
        let mut sim = sim();
        let anonymous = send(&mut sim, Method::GET, "/api/franchise/3", Value::Null);
        assert_eq!(anonymous.body, json!([]));

        sim.session.login("3");
        let diner = send(&mut sim, Method::GET, "/api/franchise/3", Value::Null);
        assert_eq!(diner.body, json!([]));

        sim.session.login("1");
        let admin = send(&mut sim, Method::GET, "/api/franchise/3", Value::Null);
        assert_eq!(admin.body.as_array().unwrap().len(), 4);
    }
}
