//! # OpenAPI Document Assembly
//!
//! Collects every utoipa-documented route into one OpenAPI document served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MRP Gateway API",
        version = "0.1.0",
        description = "Shop-floor backend: login, production orders and workorder transitions proxied to the upstream MRP system.",
        license(name = "MIT")
    ),
    paths(
        // Login
        crate::routes::login::login_access_token,
        // Users
        crate::routes::users::read_user_me,
        crate::routes::users::update_password_me,
        // Production orders
        crate::routes::production_orders::read_production_orders,
        // Workorders
        crate::routes::workorders::read_workorders,
        crate::routes::workorders::read_reasons_loss,
        crate::routes::workorders::read_products,
        crate::routes::workorders::start_workorder,
        crate::routes::workorders::pause_workorder,
        crate::routes::workorders::finish_workorder,
        crate::routes::workorders::block_workorder,
        crate::routes::workorders::unblock_workorder,
        crate::routes::workorders::add_component_workorder,
        crate::routes::workorders::consume_component_workorder,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::Message,
        crate::routes::login::LoginForm,
        crate::routes::login::Token,
        crate::routes::users::UserPublic,
        crate::routes::users::UpdatePassword,
        crate::routes::production_orders::ProductionOrdersPublic,
        crate::routes::workorders::WorkOrdersPublic,
        crate::routes::workorders::ReasonsLossPublic,
        crate::routes::workorders::ProductsPublic,
        crate::routes::workorders::ChangeStateWorkOrder,
        crate::routes::workorders::BlockWorkOrder,
        crate::routes::workorders::AddComponent,
        crate::routes::workorders::ConsumeComponent,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "login", description = "Session tokens"),
        (name = "users", description = "Calling employee"),
        (name = "production_orders", description = "Production orders"),
        (name = "workorders", description = "Workorders and their catalogs"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` JWT security scheme referenced by the paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
