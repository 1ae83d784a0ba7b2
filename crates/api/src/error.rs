//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::CheckoutError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Checkout engine error.
    Checkout(CheckoutError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Checkout(err) => checkout_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, String) {
    match &err {
        // Client-input errors: the message carries the offending id so the
        // caller can self-correct. Not logged as system failures.
        CheckoutError::EmptyCart
        | CheckoutError::ProductNotFound(_)
        | CheckoutError::OutOfStock(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        CheckoutError::SessionNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        CheckoutError::AlreadyComplete(_) => (StatusCode::CONFLICT, err.to_string()),
        // Internal invariant violations: an upstream component misbehaved.
        CheckoutError::Money(_) | CheckoutError::Store(_) => {
            tracing::error!(error = %err, "internal invariant violation");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}
