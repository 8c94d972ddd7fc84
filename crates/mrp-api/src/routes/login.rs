//! Login: exchange upstream credentials for a session token.

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::routing::post;
use axum::{Json, Router};
use mrp_upstream::operation::AUTHENTICATE;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::BearerToken;
use crate::error::AppError;
use crate::extractors::extract_form;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/login/access-token", post(login_access_token))
}

/// OAuth2 password-flow form. Other OAuth2 fields are accepted and ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Session token returned by login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/login/access-token",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Session token issued", body = Token),
        (status = 400, description = "Credentials rejected", body = crate::error::ErrorBody),
        (status = 401, description = "Upstream unreachable", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed form", body = crate::error::ErrorBody),
    ),
    tag = "login"
)]
pub async fn login_access_token(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<Token>, AppError> {
    let form = extract_form(form)?;
    let employees = state.upstream.employees();
    let employee = state
        .proxy
        .run(&AUTHENTICATE, &BearerToken::default(), |_| {
            employees.authenticate(&form.username, &form.password)
        })
        .await?;

    let access_token = state
        .tokens
        .issue(&employee.id.to_string())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(employee_id = employee.id, "session token issued");
    Ok(Json(Token::bearer(access_token)))
}
