//! User management under `/api/user`.

use serde_json::{json, Value};
use tracing::info;

use super::auth::{auth_response, non_empty};
use super::dispatch::{MockRequest, MockResponse, RouteParams};
use super::error::ApiError;
use super::guard;
use crate::db::{
    ListUsersParams, NameFilter, PageRequest, Simulator, UpdateUserRequest, UserListResponse,
    UserResponse,
};

/// GET /api/user/me
///
/// The session user, or `null` when nobody is logged in.
pub fn me(
    sim: &mut Simulator,
    _request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    match sim.current_user() {
        Some(user) => MockResponse::ok(&UserResponse::from(user)),
        None => MockResponse::ok(&Value::Null),
    }
}

/// GET /api/user?page&limit&name (admin only)
pub fn list_users(
    sim: &mut Simulator,
    request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    guard::require_admin(sim)?;

    let params: ListUsersParams = request.query();
    let filter = NameFilter::parse(params.name.as_deref());
    let page = PageRequest::parse(params.page.as_deref(), params.limit.as_deref());

    let result = sim.users.list(&filter, &page);
    MockResponse::ok(&UserListResponse {
        users: result.items.into_iter().map(UserResponse::from).collect(),
        more: result.more,
    })
}

/// DELETE /api/user/:id (admin only)
///
/// Deleting an unknown id still succeeds.
pub fn delete_user(
    sim: &mut Simulator,
    _request: &MockRequest,
    params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    guard::require_admin(sim)?;

    let user_id = params.get(0).unwrap_or_default();
    if let Some(removed) = sim.users.remove_by_id(user_id) {
        info!(user_id = %removed.id, email = %removed.email, "User deleted");
    }

    MockResponse::ok(&json!({}))
}

/// PUT /api/user/:id (the user themselves or an admin)
///
/// Applies any non-empty `name`, `email` and `password`. An email change
/// rekeys the store; the session follows automatically since it tracks ids.
pub fn update_user(
    sim: &mut Simulator,
    request: &MockRequest,
    params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    let user_id = params.get(0).unwrap_or_default();
    let old_email = sim
        .users
        .find_by_id(user_id)
        .map(|u| u.email.clone())
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    guard::require_self_or_admin(sim, user_id)?;

    let req: UpdateUserRequest = request.json();
    let user = sim
        .users
        .find_by_id_mut(user_id)
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    if let Some(name) = non_empty(req.name) {
        user.name = name;
    }
    if let Some(password) = non_empty(req.password) {
        user.password = password;
    }
    // Any submitted email rekeys, which also moves the user to the end
    if let Some(email) = non_empty(req.email) {
        sim.users.rekey(&old_email, &email);
        if email != old_email {
            info!(user_id, old = %old_email, new = %email, "User email changed");
        }
    }

    let user = sim
        .users
        .find_by_id(user_id)
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    info!(user_id, "User updated");
    auth_response(sim, user)
}
