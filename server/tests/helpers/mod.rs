//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full axum
//! router via `tower::ServiceExt::oneshot`, with role headers attached the way
//! the identity gateway forwards them.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{self, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pulse_common::Role;
use pulse_server::api::{create_router, AppState};
use pulse_server::auth::{ACTIVE_ROLE_HEADER, ROLES_HEADER};
use pulse_server::config::Config;
use pulse_server::permissions::RolePermissionTable;
use tower::ServiceExt;

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a test app with the built-in permission table.
    pub fn new() -> Self {
        Self::with_table(RolePermissionTable::builtin())
    }

    /// Create a test app with a custom permission table.
    pub fn with_table(table: RolePermissionTable) -> Self {
        Self::with_config(Config::default_for_test(), table)
    }

    /// Create a test app with explicit configuration and table.
    pub fn with_config(config: Config, table: RolePermissionTable) -> Self {
        let state = AppState::new(config, table);
        Self {
            router: create_router(state),
        }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Attach role headers for a signed-in user.
    pub fn as_user(
        builder: http::request::Builder,
        active_role: Option<Role>,
        roles: &[Role],
    ) -> http::request::Builder {
        let mut builder = builder;
        if let Some(role) = active_role {
            builder = builder.header(ACTIVE_ROLE_HEADER, role.as_str());
        }
        if !roles.is_empty() {
            let list = roles
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(",");
            builder = builder.header(ROLES_HEADER, list);
        }
        builder
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }

    /// Send a GET request as the given user and return status and JSON body.
    pub async fn get_json(
        &self,
        uri: &str,
        active_role: Option<Role>,
        roles: &[Role],
    ) -> (StatusCode, serde_json::Value) {
        let req = Self::as_user(Self::request(Method::GET, uri), active_role, roles)
            .body(Body::empty())
            .unwrap();
        let resp = self.oneshot(req).await;
        let status = resp.status();
        (status, body_to_json(resp).await)
    }

    /// Send a POST request with a JSON body as the given user.
    pub async fn post_json(
        &self,
        uri: &str,
        active_role: Option<Role>,
        roles: &[Role],
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let req = Self::as_user(Self::request(Method::POST, uri), active_role, roles)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap();
        let resp = self.oneshot(req).await;
        let status = resp.status();
        (status, body_to_json(resp).await)
    }
}

/// Collect a response body and parse it as JSON. Empty bodies become `Null`.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}
