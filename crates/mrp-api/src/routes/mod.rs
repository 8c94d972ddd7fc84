//! # API Route Modules
//!
//! Everything is mounted under `/api/v1`:
//!
//! - `login`: OAuth2 password-flow login issuing a session token.
//! - `users`: profile and password of the calling employee.
//! - `production_orders`: paginated production order listing.
//! - `workorders`: workorder listing, catalogs and state transitions.

pub mod login;
pub mod production_orders;
pub mod users;
pub mod workorders;

use axum::Router;
use mrp_upstream::OrderQuery;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::state::AppState;

/// Prefix every route below is nested under.
pub const API_PREFIX: &str = "/api/v1";

/// All `/api/v1` routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(login::router())
        .merge(users::router())
        .merge(production_orders::router())
        .merge(workorders::router())
}

/// Plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Search and pagination parameters for order listings.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Free-text search on order name or reference.
    pub order_search: Option<String>,
    /// Include orders in every state, not only the active ones.
    #[serde(default)]
    pub show_all_state: bool,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

impl From<ListQuery> for OrderQuery {
    fn from(q: ListQuery) -> Self {
        Self {
            order_search: q.order_search,
            show_all_state: q.show_all_state,
            start: q.skip,
            limit: q.limit,
        }
    }
}
