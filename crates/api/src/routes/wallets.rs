//! Wallet management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use tesora_db::{WalletRepository, entities::wallets, repositories::WalletError};

use super::error_response;

/// Creates the wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallets", post(create_wallet))
        .route("/wallets/{user_id}", get(list_wallets))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a wallet.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    /// Owning user ID.
    pub user_id: Uuid,
    /// Wallet name.
    pub wallet_name: String,
}

/// Response for a wallet.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    /// Wallet ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user_id: Uuid,
    /// Wallet name.
    pub name: String,
    /// Current balance.
    pub balance: Decimal,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<wallets::Model> for WalletResponse {
    fn from(model: wallets::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            balance: model.balance,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/wallets` - Create a wallet with the configured starting balance.
async fn create_wallet(
    State(state): State<AppState>,
    Json(payload): Json<CreateWalletRequest>,
) -> impl IntoResponse {
    let repo = wallet_repository(&state);

    match repo
        .create_wallet(payload.user_id, payload.wallet_name)
        .await
    {
        Ok(wallet) => {
            info!(
                wallet_id = %wallet.id,
                user_id = %wallet.user_id,
                name = %wallet.name,
                "Wallet created"
            );
            (StatusCode::OK, Json(WalletResponse::from(wallet))).into_response()
        }
        Err(e) => wallet_error(&e),
    }
}

/// GET `/wallets/{user_id}` - List a user's wallets, oldest first.
///
/// An unknown user yields an empty list, not a 404.
async fn list_wallets(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = wallet_repository(&state);

    match repo.wallets_by_user(user_id).await {
        Ok(wallets) => {
            let items: Vec<WalletResponse> =
                wallets.into_iter().map(WalletResponse::from).collect();
            (StatusCode::OK, Json(json!({ "wallets": items }))).into_response()
        }
        Err(e) => wallet_error(&e),
    }
}

/// Builds a wallet repository from the shared state.
fn wallet_repository(state: &AppState) -> WalletRepository {
    WalletRepository::new(
        (*state.db).clone(),
        state.config.ledger.initial_wallet_balance,
    )
}

/// Maps a repository failure onto the error body, logging driver errors.
fn wallet_error(err: &WalletError) -> Response {
    if let WalletError::Database(db_err) = err {
        error!(error = %db_err, "Database error handling wallet");
    }
    error_response(
        err.status_code(),
        err.error_code(),
        &err.to_string(),
        err.reason(),
    )
}
