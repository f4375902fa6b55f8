//! Batch settlement of queued transactions.
//!
//! A run drains every `PENDING` transaction, wallet by wallet. Balance
//! writes and status flips commit together in one outer database
//! transaction; a group that fails rolls back to its savepoint while the
//! rest of the run continues. Runs must not overlap: the caller awaits
//! each run before starting the next.

use chrono::Utc;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tesora_core::settlement::{QueuedTransaction, SettlementReport, group_by_wallet, settle_group};
use tesora_shared::types::{TransactionId, WalletId};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::transaction::bound_lock_waits;
use crate::entities::{sea_orm_active_enums::TransactionStatus, transactions, wallets};

/// Error types for settlement runs.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Batch settlement processor for queued transactions.
#[derive(Debug, Clone)]
pub struct SettlementProcessor {
    db: DatabaseConnection,
    lock_timeout_ms: u64,
}

impl SettlementProcessor {
    /// Creates a new settlement processor.
    ///
    /// Wallet row locks taken by a run give up after `lock_timeout_ms`
    /// milliseconds.
    #[must_use]
    pub const fn new(db: DatabaseConnection, lock_timeout_ms: u64) -> Self {
        Self {
            db,
            lock_timeout_ms,
        }
    }

    /// Runs one settlement pass over every queued transaction.
    ///
    /// Each wallet's group settles inside its own savepoint; a group that
    /// fails is rolled back, logged, and reported as skipped while the
    /// other groups proceed. Balance writes and the batch status flip
    /// commit atomically at the end: a run that dies mid-way leaves every
    /// row queued and no balance touched, so a transaction's balance
    /// effect is applied at most once across runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be read or the outer database
    /// transaction fails. Per-group failures are reported as skipped
    /// outcomes instead.
    pub async fn run(&self) -> Result<SettlementReport, SettlementError> {
        let queue = self.fetch_queue().await?;
        if queue.is_empty() {
            return Ok(SettlementReport::new());
        }

        let groups = group_by_wallet(queue);
        info!(wallet_groups = groups.len(), "Settlement run started");

        let mut report = SettlementReport::new();
        let mut settled_ids: Vec<Uuid> = Vec::new();

        let txn = self.db.begin().await?;
        bound_lock_waits(&txn, self.lock_timeout_ms).await?;

        for (wallet_id, group) in groups {
            match settle_wallet_group(&txn, wallet_id, &group).await {
                Ok(ids) => {
                    report.record_settled(wallet_id, ids.len());
                    settled_ids.extend(ids);
                }
                Err(reason) => {
                    warn!(wallet_id = %wallet_id, reason = %reason, "Settlement group skipped");
                    report.record_skipped(wallet_id, reason);
                }
            }
        }

        if !settled_ids.is_empty() {
            let now = Utc::now();
            transactions::Entity::update_many()
                .col_expr(
                    transactions::Column::Status,
                    TransactionStatus::Approved.as_enum(),
                )
                .col_expr(
                    transactions::Column::UpdatedAt,
                    sea_orm::sea_query::Expr::value(now),
                )
                .filter(transactions::Column::Id.is_in(settled_ids))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        info!(
            settled_groups = report.settled_groups(),
            skipped_groups = report.skipped_groups(),
            transactions = report.settled_transactions(),
            "Settlement run finished"
        );

        Ok(report)
    }

    /// Fetches queued transactions, oldest first.
    async fn fetch_queue(&self) -> Result<Vec<QueuedTransaction>, SettlementError> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::Status.eq(TransactionStatus::Pending))
            .order_by_asc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| QueuedTransaction {
                id: TransactionId::from_uuid(row.id),
                wallet_id: WalletId::from_uuid(row.wallet_id),
                kind: row.kind.into(),
                amount: row.amount,
            })
            .collect())
    }
}

/// Settles one wallet's group inside a savepoint.
///
/// Returns the settled transaction IDs, or the reason the group was
/// skipped. A skip rolls the savepoint back, so the group's rows stay
/// queued for the next run.
async fn settle_wallet_group(
    txn: &DatabaseTransaction,
    wallet_id: WalletId,
    group: &[QueuedTransaction],
) -> Result<Vec<Uuid>, String> {
    let nested = txn.begin().await.map_err(|err| err.to_string())?;

    match apply_group(&nested, wallet_id, group).await {
        Ok(settled) => {
            nested.commit().await.map_err(|err| err.to_string())?;
            Ok(settled)
        }
        Err(reason) => {
            if let Err(rollback_err) = nested.rollback().await {
                error!(wallet_id = %wallet_id, error = %rollback_err, "Savepoint rollback failed");
            }
            Err(reason)
        }
    }
}

/// Applies a group to its wallet under the wallet's row lock.
async fn apply_group(
    nested: &DatabaseTransaction,
    wallet_id: WalletId,
    group: &[QueuedTransaction],
) -> Result<Vec<Uuid>, String> {
    let wallet = wallets::Entity::find_by_id(wallet_id.into_inner())
        .lock_exclusive()
        .one(nested)
        .await
        .map_err(|err| err.to_string())?
        .ok_or_else(|| format!("Wallet with ID {wallet_id} not found"))?;

    let settlement = settle_group(wallet.balance, group);

    let mut wallet_update: wallets::ActiveModel = wallet.into();
    wallet_update.balance = Set(settlement.closing_balance);
    wallet_update.updated_at = Set(Utc::now().into());
    wallet_update
        .update(nested)
        .await
        .map_err(|err| err.to_string())?;

    Ok(settlement
        .settled
        .into_iter()
        .map(TransactionId::into_inner)
        .collect())
}
