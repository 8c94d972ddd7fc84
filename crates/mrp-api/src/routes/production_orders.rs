//! Production order listing.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use mrp_upstream::operation::GET_PRODUCTION_ORDERS;
use mrp_upstream::OrderQuery;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ListQuery;
use crate::auth::BearerToken;
use crate::error::AppError;
use crate::extractors::extract_query;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/production-orders", get(read_production_orders))
}

/// A page of production orders, passed through as the upstream sent them.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductionOrdersPublic {
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
    pub count: u64,
}

#[utoipa::path(
    get,
    path = "/api/v1/production-orders",
    params(ListQuery),
    responses(
        (status = 200, description = "Production orders", body = ProductionOrdersPublic),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
        (status = 500, description = "Upstream refused the listing", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "production_orders"
)]
pub async fn read_production_orders(
    State(state): State<AppState>,
    bearer: BearerToken,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ProductionOrdersPublic>, AppError> {
    let query: OrderQuery = extract_query(query)?.into();
    let upstream = &state.upstream;
    let page = state
        .proxy
        .run(&GET_PRODUCTION_ORDERS, &bearer, move |caller| async move {
            upstream
                .production_orders()
                .list(caller.employee_id(), &query)
                .await
        })
        .await?;

    Ok(Json(ProductionOrdersPublic {
        data: page.items,
        count: page.count,
    }))
}
