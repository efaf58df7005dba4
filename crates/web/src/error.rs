//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::gateway::GatewayError;
use crate::stock::ReserveError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Downstream gateway error.
    Gateway(GatewayError),
    /// Stock reservation error.
    Reserve(ReserveError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Gateway(err) => (gateway_error_status(&err), err.to_string()),
            ApiError::Reserve(err) => {
                let ReserveError::Reservation { ref source, .. } = err;
                (gateway_error_status(source), err.to_string())
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn gateway_error_status(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::NotFound => StatusCode::NOT_FOUND,
        GatewayError::NotEnough | GatewayError::EditConflict => StatusCode::CONFLICT,
        GatewayError::ServiceUnavailable(_)
        | GatewayError::UnexpectedStatus(_)
        | GatewayError::Transport(_) => {
            tracing::error!(error = %err, "downstream service failure");
            StatusCode::BAD_GATEWAY
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError::Gateway(err)
    }
}

impl From<ReserveError> for ApiError {
    fn from(err: ReserveError) -> Self {
        ApiError::Reserve(err)
    }
}
