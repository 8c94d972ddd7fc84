//! # mrp-api -- Shop-floor Backend for the Upstream MRP System
//!
//! Authenticates employees, issues session tokens, and proxies production
//! order and workorder operations to the upstream system through
//! `mrp-upstream`. No business state is kept here.
//!
//! ## API Surface
//!
//! | Prefix | Module | Domain |
//! |--------|--------|--------|
//! | `/api/v1/login/*` | [`routes::login`] | Session tokens |
//! | `/api/v1/users/*` | [`routes::users`] | Calling employee |
//! | `/api/v1/production-orders` | [`routes::production_orders`] | Production orders |
//! | `/api/v1/workorders/*` | [`routes::workorders`] | Workorders, catalogs |
//!
//! ## OpenAPI
//!
//! Generated with utoipa and served at `/openapi.json`.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .nest(routes::API_PREFIX, routes::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe -- always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The upstream is not probed; every call reports its own
/// failure.
async fn readiness() -> &'static str {
    "ready"
}
