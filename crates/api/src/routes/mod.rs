//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;

pub mod health;
pub mod transactions;
pub mod wallets;

/// Creates the API router with all domain routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(transactions::routes())
        .merge(wallets::routes())
}

/// Builds the error body shared by the domain routes.
pub(crate) fn error_response(status: u16, code: &str, message: &str, reason: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "code": code,
            "message": message,
            "reason": reason,
        })),
    )
        .into_response()
}
