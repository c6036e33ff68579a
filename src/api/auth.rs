//! Registration, login and logout under `/api/auth`.

use tracing::info;

use super::dispatch::{MockRequest, MockResponse, RouteParams};
use super::error::ApiError;
use crate::db::{
    AuthResponse, LoginRequest, MessageResponse, RegisterRequest, Role, Simulator, User,
    UserResponse,
};

/// Keep only present, non-empty values.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn auth_response(sim: &Simulator, user: &User) -> Result<MockResponse, ApiError> {
    MockResponse::ok(&AuthResponse {
        user: UserResponse::from(user),
        token: sim.token().to_string(),
    })
}

/// POST /api/auth
///
/// Creates a diner and logs them in. An existing user with the same email is
/// replaced; emails are not checked for uniqueness.
pub fn register(
    sim: &mut Simulator,
    request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    let req: RegisterRequest = request.json();

    let (Some(name), Some(email), Some(password)) = (
        non_empty(req.name),
        non_empty(req.email),
        non_empty(req.password),
    ) else {
        return Err(ApiError::validation(
            "name, email, and password are required",
        ));
    };

    let id = sim.allocate_user_id();
    let user = User::new(id.clone(), name, email, password, Role::Diner);
    let response = auth_response(sim, &user)?;

    if let Some(replaced) = sim.users.insert(user) {
        info!(user_id = %replaced.id, email = %replaced.email, "Registration replaced existing user");
    }
    sim.session.login(id.clone());

    info!(user_id = %id, "User registered");
    Ok(response)
}

/// PUT /api/auth
pub fn login(
    sim: &mut Simulator,
    request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    let req: LoginRequest = request.json();

    let user = req
        .email
        .as_deref()
        .and_then(|email| sim.users.get(email))
        .filter(|user| Some(user.password.as_str()) == req.password.as_deref())
        .ok_or_else(ApiError::unauthorized)?;

    let response = auth_response(sim, user)?;
    let (user_id, role) = (user.id.clone(), user.display_role());
    sim.session.login(user_id.clone());

    info!(user_id = %user_id, role = %role, "User logged in");
    Ok(response)
}

/// DELETE /api/auth
///
/// Always succeeds, whether or not anyone was logged in.
pub fn logout(
    sim: &mut Simulator,
    _request: &MockRequest,
    _params: &RouteParams,
) -> Result<MockResponse, ApiError> {
    if let Some(user_id) = sim.session.logout() {
        info!(user_id = %user_id, "User logged out");
    }
    MockResponse::ok(&MessageResponse::new("logout successful"))
}
