//! Route dispatcher for the simulated API.
//!
//! Requests are matched against a fixed, explicitly ordered table. The first
//! entry whose method filter and anchored path pattern both match decides
//! the outcome. More specific patterns sit above the generic ones they
//! overlap with (`/api/user/me` before the `/api/user...` group, store
//! routes before the bare franchise id routes).
//!
//! A request that reaches a pass-through entry, or matches nothing at all,
//! is reported as [`Dispatch::PassThrough`] rather than an error so callers
//! can tell "not simulated" apart from a simulated 404.

use axum::extract::Query;
use axum::http::{uri::InvalidUri, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::ApiError;
use super::{auth, franchises, orders, users};
use crate::db::Simulator;

/// One simulated HTTP call.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: Method,
    pub uri: Uri,
    pub body: Value,
}

impl MockRequest {
    /// Accepts both absolute (`http://host/api/auth`) and origin-form
    /// (`/api/user?page=1`) URLs.
    pub fn new(method: Method, url: &str) -> Result<Self, InvalidUri> {
        Ok(Self {
            method,
            uri: url.parse()?,
            body: Value::Null,
        })
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Decode the JSON body. A missing, malformed or mistyped body decodes
    /// as the type's default so that handlers see "fields absent".
    pub fn json<T: DeserializeOwned + Default>(&self) -> T {
        serde_json::from_value(self.body.clone()).unwrap_or_default()
    }

    /// Decode the query string, defaulting when it is absent or malformed.
    pub fn query<T: DeserializeOwned + Default>(&self) -> T {
        Query::<T>::try_from_uri(&self.uri)
            .map(|Query(q)| q)
            .unwrap_or_default()
    }
}

/// Status plus JSON body produced by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl MockResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// 200 with `value` serialized as the body.
    pub fn ok<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        Ok(Self::new(StatusCode::OK, serde_json::to_value(value)?))
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Outcome of dispatching one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The simulator answered.
    Fulfilled(MockResponse),
    /// The simulator does not mock this request.
    PassThrough,
}

impl Dispatch {
    pub fn response(&self) -> Option<&MockResponse> {
        match self {
            Dispatch::Fulfilled(response) => Some(response),
            Dispatch::PassThrough => None,
        }
    }
}

/// Positional captures from a route pattern.
#[derive(Debug, Clone, Default)]
pub struct RouteParams(Vec<String>);

impl RouteParams {
    fn from_captures(captures: &Captures<'_>) -> Self {
        Self(
            captures
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect(),
        )
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Numeric path segment. Patterns only capture digits, so `None` means
    /// an id too large to name any record.
    pub fn id(&self, index: usize) -> Option<u64> {
        self.get(index).and_then(|s| s.parse().ok())
    }
}

pub type Handler = fn(&mut Simulator, &MockRequest, &RouteParams) -> Result<MockResponse, ApiError>;

pub enum Action {
    Handle(Handler),
    MethodNotAllowed,
    PassThrough,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Handle(_) => "handle",
            Action::MethodNotAllowed => "405",
            Action::PassThrough => "pass-through",
        }
    }
}

/// One entry of the precedence table. `method: None` matches any method.
pub struct Route {
    pub name: &'static str,
    pub method: Option<Method>,
    pub pattern: Regex,
    pub action: Action,
}

impl Route {
    fn new(name: &'static str, method: Option<Method>, pattern: &str, action: Action) -> Self {
        Self {
            name,
            method,
            pattern: Regex::new(pattern)
                .unwrap_or_else(|e| panic!("Invalid route pattern {}: {}", pattern, e)),
            action,
        }
    }

    fn accepts(&self, method: &Method) -> bool {
        self.method.as_ref().map_or(true, |m| m == method)
    }

    /// `METHOD pattern -> action` line for listings.
    pub fn describe(&self) -> String {
        format!(
            "{:<7} {:<38} {:<13} {}",
            self.method.as_ref().map_or("*", Method::as_str),
            self.pattern.as_str(),
            self.action.label(),
            self.name
        )
    }
}

lazy_static! {
    static ref ROUTES: Vec<Route> = vec![
        // Auth
        Route::new("register", Some(Method::POST), r"^/api/auth$", Action::Handle(auth::register)),
        Route::new("login", Some(Method::PUT), r"^/api/auth$", Action::Handle(auth::login)),
        Route::new("logout", Some(Method::DELETE), r"^/api/auth$", Action::Handle(auth::logout)),
        Route::new("auth", None, r"^/api/auth$", Action::MethodNotAllowed),
        // Current user, ahead of the user group
        Route::new("me", Some(Method::GET), r"^/api/user/me$", Action::Handle(users::me)),
        Route::new("me", None, r"^/api/user/me$", Action::MethodNotAllowed),
        // User management
        Route::new("list_users", Some(Method::GET), r"^/api/user$", Action::Handle(users::list_users)),
        Route::new("delete_user", Some(Method::DELETE), r"^/api/user/(\d+)$", Action::Handle(users::delete_user)),
        Route::new("update_user", Some(Method::PUT), r"^/api/user/(\d+)$", Action::Handle(users::update_user)),
        Route::new("user_group", None, r"^/api/user", Action::PassThrough),
        // Menu, ahead of the order routes
        Route::new("menu", Some(Method::GET), r"^/api/order/menu$", Action::Handle(orders::menu)),
        Route::new("menu", None, r"^/api/order/menu$", Action::MethodNotAllowed),
        // Franchises and stores, nested store paths first. Franchise deletion
        // is a prefix match: anything under /api/franchise/<digits> that is
        // not a store deletion deletes by the last path segment.
        Route::new("create_franchise", Some(Method::POST), r"^/api/franchise$", Action::Handle(franchises::create_franchise)),
        Route::new("list_franchises", Some(Method::GET), r"^/api/franchise$", Action::Handle(franchises::list_franchises)),
        Route::new("delete_store", Some(Method::DELETE), r"^/api/franchise/(\d+)/store/(\d+)$", Action::Handle(franchises::delete_store)),
        Route::new("create_store", Some(Method::POST), r"^/api/franchise/(\d+)/store$", Action::Handle(franchises::create_store)),
        Route::new("delete_franchise", Some(Method::DELETE), r"^/api/franchise/\d+", Action::Handle(franchises::delete_franchise)),
        Route::new("user_franchises", Some(Method::GET), r"^/api/franchise/(\d+)$", Action::Handle(franchises::user_franchises)),
        Route::new("franchise_group", None, r"^/api/franchise", Action::PassThrough),
        // Orders
        Route::new("order_history", Some(Method::GET), r"^/api/order$", Action::Handle(orders::order_history)),
        Route::new("place_order", Some(Method::POST), r"^/api/order$", Action::Handle(orders::place_order)),
        Route::new("order", None, r"^/api/order$", Action::MethodNotAllowed),
    ];
}

/// The precedence table, highest priority first.
pub fn routes() -> &'static [Route] {
    &ROUTES
}

/// Run one request to completion against the simulator state.
pub fn dispatch(sim: &mut Simulator, request: &MockRequest) -> Dispatch {
    let path = request.path();

    for route in ROUTES.iter() {
        if !route.accepts(&request.method) {
            continue;
        }
        let Some(captures) = route.pattern.captures(path) else {
            continue;
        };

        debug!(route = route.name, method = %request.method, path, "Matched mock route");

        return match &route.action {
            Action::Handle(handler) => {
                let params = RouteParams::from_captures(&captures);
                let response = handler(sim, request, &params).unwrap_or_else(MockResponse::from);
                Dispatch::Fulfilled(response)
            }
            Action::MethodNotAllowed => {
                Dispatch::Fulfilled(ApiError::method_not_allowed().into())
            }
            Action::PassThrough => Dispatch::PassThrough,
        };
    }

    debug!(method = %request.method, path, "No mock route, passing through");
    Dispatch::PassThrough
}
