//! Transaction submission and approval routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use tesora_core::ledger;
use tesora_db::{
    TransactionRepository, entities::transactions, repositories::TransactionError,
};

use super::error_response;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transaction))
        .route(
            "/transactions/{transaction_id}/approve",
            post(approve_transaction),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for submitting a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// Target wallet ID.
    pub wallet_id: Uuid,
    /// Transaction amount.
    pub amount: Decimal,
    /// DEBIT or CREDIT.
    pub transaction_type: ledger::TransactionKind,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Wallet the transaction belongs to.
    pub wallet_id: Uuid,
    /// Transaction amount.
    pub amount: Decimal,
    /// DEBIT or CREDIT.
    pub transaction_type: ledger::TransactionKind,
    /// Stored outcome of the validation pipeline.
    pub status: ledger::TransactionStatus,
    /// Rejection message, when the pipeline stored one.
    pub message: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            wallet_id: model.wallet_id,
            amount: model.amount,
            transaction_type: model.kind.into(),
            status: model.status.into(),
            message: model.message,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/transactions` - Run a transaction through the validation pipeline.
///
/// A rejected transaction is still a 200: the outcome is stored on the row
/// and reported in `status` and `message`.
async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let repo = transaction_repository(&state);

    match repo
        .create_transaction(payload.wallet_id, payload.transaction_type, payload.amount)
        .await
    {
        Ok(transaction) => {
            info!(
                transaction_id = %transaction.id,
                wallet_id = %transaction.wallet_id,
                status = ?transaction.status,
                "Transaction recorded"
            );
            (StatusCode::OK, Json(TransactionResponse::from(transaction))).into_response()
        }
        Err(e) => transaction_error(&e),
    }
}

/// POST `/transactions/{transaction_id}/approve` - Manually approve a held
/// transaction, queueing it for batch settlement.
async fn approve_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = transaction_repository(&state);

    match repo.approve_transaction(transaction_id).await {
        Ok(transaction) => {
            info!(transaction_id = %transaction.id, "Transaction approved");
            (StatusCode::OK, Json(TransactionResponse::from(transaction))).into_response()
        }
        Err(e) => transaction_error(&e),
    }
}

/// Builds a transaction repository from the shared state.
fn transaction_repository(state: &AppState) -> TransactionRepository {
    TransactionRepository::new(
        (*state.db).clone(),
        state.config.ledger.approval_threshold,
        state.config.database.lock_timeout_ms,
    )
}

/// Maps a repository failure onto the error body, logging driver errors.
fn transaction_error(err: &TransactionError) -> Response {
    if let TransactionError::Database(db_err) = err {
        error!(error = %db_err, "Database error handling transaction");
    }
    error_response(
        err.status_code(),
        err.error_code(),
        &err.to_string(),
        err.reason(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tesora_db::entities::sea_orm_active_enums::{
        TransactionKind as StoredKind, TransactionStatus as StoredStatus,
    };

    #[test]
    fn test_request_accepts_camel_case_payload() {
        let wallet_id = Uuid::new_v4();
        let payload = json!({
            "walletId": wallet_id,
            "amount": "250.50",
            "transactionType": "DEBIT",
        });

        let request: CreateTransactionRequest =
            serde_json::from_value(payload).expect("Payload should deserialize");

        assert_eq!(request.wallet_id, wallet_id);
        assert_eq!(request.amount, dec!(250.50));
        assert_eq!(request.transaction_type, ledger::TransactionKind::Debit);
    }

    #[test]
    fn test_request_rejects_unknown_transaction_type() {
        let payload = json!({
            "walletId": Uuid::new_v4(),
            "amount": "10",
            "transactionType": "TRANSFER",
        });

        let result: Result<CreateTransactionRequest, _> = serde_json::from_value(payload);

        assert!(result.is_err());
    }

    #[test]
    fn test_response_uses_wire_field_names() {
        let created_at: sea_orm::prelude::DateTimeWithTimeZone = "2026-01-05T08:30:00Z"
            .parse()
            .expect("Timestamp should parse");
        let model = transactions::Model {
            id: Uuid::new_v4(),
            wallet_id: Uuid::new_v4(),
            kind: StoredKind::Debit,
            status: StoredStatus::AwaitingApproval,
            amount: dec!(1500),
            message: None,
            created_at,
            updated_at: created_at,
        };

        let body = serde_json::to_value(TransactionResponse::from(model))
            .expect("Response should serialize");

        assert_eq!(body["transactionType"], "DEBIT");
        assert_eq!(body["status"], "AWAITING_APPROVAL");
        assert!(body["walletId"].is_string());
        assert!(body["createdAt"].is_string());
        assert!(body["message"].is_null());
    }
}
