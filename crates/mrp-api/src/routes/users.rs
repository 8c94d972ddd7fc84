//! The calling employee's profile and password.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, patch};
use axum::{Json, Router};
use mrp_upstream::operation::{GET_EMPLOYEE, RESET_PASSWORD};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Message;
use crate::auth::BearerToken;
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(read_user_me))
        .route("/users/me/password", patch(update_password_me))
}

/// Public view of an employee.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserPublic {
    pub full_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePassword {
    pub current_password: String,
    pub new_password: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current employee", body = UserPublic),
        (status = 400, description = "Employee not found", body = crate::error::ErrorBody),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn read_user_me(
    State(state): State<AppState>,
    bearer: BearerToken,
) -> Result<Json<UserPublic>, AppError> {
    let upstream = &state.upstream;
    let employee = state
        .proxy
        .run(&GET_EMPLOYEE, &bearer, move |caller| async move {
            upstream.employees().get(caller.employee_id()).await
        })
        .await?;

    Ok(Json(UserPublic {
        full_name: employee.name,
        email: employee.email,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/me/password",
    request_body = UpdatePassword,
    responses(
        (status = 200, description = "Password changed", body = Message),
        (status = 403, description = "Not authenticated", body = crate::error::ErrorBody),
        (status = 500, description = "Upstream refused the change", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn update_password_me(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: Result<Json<UpdatePassword>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let req = extract_json(body)?;
    let upstream = &state.upstream;
    state
        .proxy
        .run(&RESET_PASSWORD, &bearer, move |caller| async move {
            upstream
                .employees()
                .reset_password(caller.employee_id(), &req.current_password, &req.new_password)
                .await
        })
        .await?;

    Ok(Json(Message::new(RESET_PASSWORD.success_message)))
}
