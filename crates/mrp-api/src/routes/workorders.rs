//! # Workorder Endpoints
//!
//! Listing, the two public catalogs used by the block and add-component
//! dialogs, and the state transitions. Transitions are validated upstream;
//! this layer only names the one requested.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET  | `/workorders` | List workorders |
//! | GET  | `/workorders/reasons-loss` | Loss reasons (public) |
//! | GET  | `/workorders/products` | Products (public) |
//! | POST | `/workorders/{start,pause,finish,unblock}` | Transition |
//! | POST | `/workorders/block` | Block with a loss reason |
//! | POST | `/workorders/add-components` | Add a component |
//! | POST | `/workorders/consume-component` | Consume a component |

use std::future::Future;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use mrp_upstream::operation::{self, Operation};
use mrp_upstream::workorders::BlockRequest;
use mrp_upstream::{OrderQuery, UpstreamError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ListQuery, Message};
use crate::auth::BearerToken;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_query};
use crate::service::Caller;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/workorders", get(read_workorders))
        .route("/workorders/reasons-loss", get(read_reasons_loss))
        .route("/workorders/products", get(read_products))
        .route("/workorders/start", post(start_workorder))
        .route("/workorders/pause", post(pause_workorder))
        .route("/workorders/finish", post(finish_workorder))
        .route("/workorders/block", post(block_workorder))
        .route("/workorders/unblock", post(unblock_workorder))
        .route("/workorders/add-components", post(add_component_workorder))
        .route("/workorders/consume-component", post(consume_component_workorder))
}

// -- DTOs ---------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkOrdersPublic {
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReasonsLossPublic {
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductsPublic {
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeStateWorkOrder {
    pub workorder_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BlockWorkOrder {
    pub workorder_id: i64,
    /// Loss reason, one of `/workorders/reasons-loss`.
    pub loss_id: i64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddComponent {
    pub workorder_id: i64,
    pub product_id: i64,
    pub quantity: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConsumeComponent {
    /// Raw-material stock move of the workorder.
    pub move_raw_id: i64,
    pub consumed: bool,
}

// -- Listings -----------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/v1/workorders",
    params(ListQuery),
    responses(
        (status = 200, description = "Workorders", body = WorkOrdersPublic),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
        (status = 500, description = "Upstream refused the listing", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "workorders"
)]
pub async fn read_workorders(
    State(state): State<AppState>,
    bearer: BearerToken,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<WorkOrdersPublic>, AppError> {
    let query: OrderQuery = extract_query(query)?.into();
    let upstream = &state.upstream;
    let page = state
        .proxy
        .run(&operation::GET_WORKORDERS, &bearer, move |caller| async move {
            upstream.workorders().list(caller.employee_id(), &query).await
        })
        .await?;

    Ok(Json(WorkOrdersPublic {
        data: page.items,
        count: page.count,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/workorders/reasons-loss",
    responses(
        (status = 200, description = "Loss reasons", body = ReasonsLossPublic),
        (status = 500, description = "Upstream refused the lookup", body = crate::error::ErrorBody),
    ),
    tag = "workorders"
)]
pub async fn read_reasons_loss(
    State(state): State<AppState>,
    bearer: BearerToken,
) -> Result<Json<ReasonsLossPublic>, AppError> {
    let catalog = state.upstream.catalog();
    let data = state
        .proxy
        .run(&operation::GET_REASONS_LOSS, &bearer, |_| catalog.reasons_loss())
        .await?;
    Ok(Json(ReasonsLossPublic { data }))
}

#[utoipa::path(
    get,
    path = "/api/v1/workorders/products",
    responses(
        (status = 200, description = "Products", body = ProductsPublic),
        (status = 500, description = "Upstream refused the lookup", body = crate::error::ErrorBody),
    ),
    tag = "workorders"
)]
pub async fn read_products(
    State(state): State<AppState>,
    bearer: BearerToken,
) -> Result<Json<ProductsPublic>, AppError> {
    let catalog = state.upstream.catalog();
    let data = state
        .proxy
        .run(&operation::GET_PRODUCTS, &bearer, |_| catalog.products())
        .await?;
    Ok(Json(ProductsPublic { data }))
}

// -- Commands -----------------------------------------------------------------

/// Run a workorder command and answer with its success message.
async fn command<F, Fut>(
    state: &AppState,
    op: &'static Operation,
    bearer: &BearerToken,
    call: F,
) -> Result<Json<Message>, AppError>
where
    F: FnOnce(Caller) -> Fut,
    Fut: Future<Output = Result<(), UpstreamError>>,
{
    state.proxy.run(op, bearer, call).await?;
    Ok(Json(Message::new(op.success_message)))
}

#[utoipa::path(
    post,
    path = "/api/v1/workorders/start",
    request_body = ChangeStateWorkOrder,
    responses(
        (status = 200, description = "Workorder started", body = Message),
        (status = 400, description = "Upstream refused the transition", body = crate::error::ErrorBody),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "workorders"
)]
pub async fn start_workorder(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: Result<Json<ChangeStateWorkOrder>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let req = extract_json(body)?;
    let workorders = state.upstream.workorders();
    command(&state, &operation::START_WORKORDER, &bearer, move |caller| async move {
        workorders.start(caller.employee_id(), req.workorder_id).await
    })
    .await
}

#[utoipa::path(
    post,
    path = "/api/v1/workorders/pause",
    request_body = ChangeStateWorkOrder,
    responses(
        (status = 200, description = "Workorder paused", body = Message),
        (status = 400, description = "Upstream refused the transition", body = crate::error::ErrorBody),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "workorders"
)]
pub async fn pause_workorder(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: Result<Json<ChangeStateWorkOrder>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let req = extract_json(body)?;
    let workorders = state.upstream.workorders();
    command(&state, &operation::PAUSE_WORKORDER, &bearer, move |caller| async move {
        workorders.pause(caller.employee_id(), req.workorder_id).await
    })
    .await
}

#[utoipa::path(
    post,
    path = "/api/v1/workorders/finish",
    request_body = ChangeStateWorkOrder,
    responses(
        (status = 200, description = "Workorder finished", body = Message),
        (status = 400, description = "Upstream refused the transition", body = crate::error::ErrorBody),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "workorders"
)]
pub async fn finish_workorder(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: Result<Json<ChangeStateWorkOrder>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let req = extract_json(body)?;
    let workorders = state.upstream.workorders();
    command(&state, &operation::FINISH_WORKORDER, &bearer, move |caller| async move {
        workorders.finish(caller.employee_id(), req.workorder_id).await
    })
    .await
}

#[utoipa::path(
    post,
    path = "/api/v1/workorders/block",
    request_body = BlockWorkOrder,
    responses(
        (status = 200, description = "Workorder blocked", body = Message),
        (status = 400, description = "Upstream refused the transition", body = crate::error::ErrorBody),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "workorders"
)]
pub async fn block_workorder(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: Result<Json<BlockWorkOrder>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let req = extract_json(body)?;
    let block = BlockRequest {
        workorder_id: req.workorder_id,
        loss_id: req.loss_id,
        description: req.description,
    };
    let workorders = state.upstream.workorders();
    command(&state, &operation::BLOCK_WORKORDER, &bearer, move |caller| async move {
        workorders.block(caller.employee_id(), &block).await
    })
    .await
}

#[utoipa::path(
    post,
    path = "/api/v1/workorders/unblock",
    request_body = ChangeStateWorkOrder,
    responses(
        (status = 200, description = "Workorder unblocked", body = Message),
        (status = 400, description = "Upstream refused the transition", body = crate::error::ErrorBody),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "workorders"
)]
pub async fn unblock_workorder(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: Result<Json<ChangeStateWorkOrder>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let req = extract_json(body)?;
    let workorders = state.upstream.workorders();
    command(&state, &operation::UNBLOCK_WORKORDER, &bearer, move |caller| async move {
        workorders.unblock(caller.employee_id(), req.workorder_id).await
    })
    .await
}

#[utoipa::path(
    post,
    path = "/api/v1/workorders/add-components",
    request_body = AddComponent,
    responses(
        (status = 200, description = "Component added", body = Message),
        (status = 400, description = "Upstream refused the change", body = crate::error::ErrorBody),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "workorders"
)]
pub async fn add_component_workorder(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: Result<Json<AddComponent>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let req = extract_json(body)?;
    let workorders = state.upstream.workorders();
    command(&state, &operation::ADD_COMPONENT, &bearer, move |caller| async move {
        workorders
            .add_component(caller.employee_id(), req.workorder_id, req.product_id, req.quantity)
            .await
    })
    .await
}

#[utoipa::path(
    post,
    path = "/api/v1/workorders/consume-component",
    request_body = ConsumeComponent,
    responses(
        (status = 200, description = "Component consumed", body = Message),
        (status = 400, description = "Upstream refused the change", body = crate::error::ErrorBody),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "workorders"
)]
pub async fn consume_component_workorder(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: Result<Json<ConsumeComponent>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let req = extract_json(body)?;
    let workorders = state.upstream.workorders();
    command(&state, &operation::CONSUME_COMPONENT, &bearer, move |caller| async move {
        workorders
            .consume_component(caller.employee_id(), req.move_raw_id, req.consumed)
            .await
    })
    .await
}
