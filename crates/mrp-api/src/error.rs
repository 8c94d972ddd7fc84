//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Upstream failures carry the status chosen by the operation descriptor;
//! the remaining variants have fixed statuses. Internal details are logged,
//! never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned when a bearer credential is missing or invalid.
pub const UNAUTHENTICATED_MESSAGE: &str = "user not authenticated";

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "UPSTREAM_REJECTED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing, undecodable or expired bearer credential (403).
    #[error("user not authenticated")]
    Unauthenticated,

    /// The upstream could not be reached or answered with garbage.
    #[error("{message}")]
    UpstreamUnreachable { status: u16, message: String },

    /// The upstream answered without reporting success.
    #[error("{message}")]
    UpstreamRejected { status: u16, message: String },

    /// Request body or query could not be parsed (422).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthenticated => (StatusCode::FORBIDDEN, "UNAUTHENTICATED"),
            Self::UpstreamUnreachable { status, .. } => {
                (descriptor_status(*status), "UPSTREAM_UNREACHABLE")
            }
            Self::UpstreamRejected { status, .. } => {
                (descriptor_status(*status), "UPSTREAM_REJECTED")
            }
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

fn descriptor_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
