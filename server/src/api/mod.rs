//! API Router and Application State
//!
//! Central routing configuration and shared state.

mod error;
pub mod me;
pub mod roles;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, permissions::RolePermissionTable};

pub use error::{ApiError, ApiResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Role permission table, read-only for the lifetime of the process
    pub table: Arc<RolePermissionTable>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(config: Config, table: RolePermissionTable) -> Self {
        Self {
            config: Arc::new(config),
            table: Arc::new(table),
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_body_size = state.config.max_body_size;

    let me_routes = Router::new()
        .route("/shell", get(me::get_shell))
        .route("/permissions", get(me::get_my_permissions))
        .route("/permissions/check", post(me::check_permissions))
        .route("/gate", post(me::evaluate_gate));

    let role_routes = Router::new()
        .route("/", get(roles::list_roles))
        .route("/{role}/permissions", get(roles::get_role_permissions))
        .route(
            "/{role}/permissions/{permission}",
            get(roles::check_role_permission),
        );

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .nest("/api/me", me_routes)
        .nest("/api/roles", role_routes)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(DefaultBodyLimit::max(max_body_size))
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
    /// Number of roles in the permission table
    roles: usize,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        roles: state.table.len(),
    })
}
