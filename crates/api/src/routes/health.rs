//! Health check endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;
    use tesora_shared::config::{
        AppConfig, DatabaseConfig, LedgerConfig, ServerConfig, SettlementConfig,
    };
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            db: Arc::new(DatabaseConnection::default()),
            config: Arc::new(AppConfig {
                server: ServerConfig::default(),
                database: DatabaseConfig {
                    url: "postgres://localhost/tesora".to_string(),
                    max_connections: 1,
                    min_connections: 1,
                    lock_timeout_ms: 5000,
                },
                ledger: LedgerConfig::default(),
                settlement: SettlementConfig::default(),
            }),
        }
    }

    #[tokio::test]
    async fn test_health_reports_status_and_version() {
        let app = crate::create_router(test_state());

        let request = Request::get("/health")
            .body(Body::empty())
            .expect("Request should build");
        let response = app.oneshot(request).await.expect("Handler should respond");

        assert_eq!(response.status(), StatusCode::OK);

        let body = response
            .into_body()
            .collect()
            .await
            .expect("Body should collect")
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).expect("Body should be JSON");
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
