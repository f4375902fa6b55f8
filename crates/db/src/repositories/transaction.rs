//! Transaction repository for ledger transaction database operations.
//!
//! Creating a transaction runs the validation pipeline against the wallet
//! under a row lock, so the stored status and the wallet balance cannot
//! disagree.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tesora_core::ledger;
use tesora_shared::types::WalletId;
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::TransactionStatus, transactions, wallets};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Wallet not found.
    #[error("Wallet with ID {0} not found")]
    WalletNotFound(Uuid),

    /// Transaction is not awaiting manual approval.
    #[error("Transaction with ID {0} is not awaiting approval")]
    NotAwaitingApproval(Uuid),

    /// The wallet row lock could not be acquired in time.
    #[error("Wallet with ID {0} is busy, please retry")]
    WalletBusy(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl TransactionError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::WalletNotFound(_) => "WALLET_NOT_FOUND",
            Self::NotAwaitingApproval(_) => "TRANSACTION_NOT_AWAITING_APPROVAL",
            Self::WalletBusy(_) => "WALLET_BUSY",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Short explanation of why the operation failed.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::WalletNotFound(_) => "The wallet does not exist.",
            Self::NotAwaitingApproval(_) => "Transaction status has to be in AWAITING_APPROVAL.",
            Self::WalletBusy(_) => "The wallet is locked by another operation, please retry.",
            Self::Database(_) => "An unexpected database error occurred.",
        }
    }

    /// HTTP status code this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::WalletNotFound(_) | Self::NotAwaitingApproval(_) => 404,
            Self::WalletBusy(_) => 409,
            Self::Database(_) => 500,
        }
    }
}

/// Transaction repository for creation, approval, and lookup.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
    approval_threshold: Decimal,
    lock_timeout_ms: u64,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    ///
    /// Amounts above `approval_threshold` wait for manual approval. Wallet
    /// row locks give up after `lock_timeout_ms` milliseconds.
    #[must_use]
    pub const fn new(
        db: DatabaseConnection,
        approval_threshold: Decimal,
        lock_timeout_ms: u64,
    ) -> Self {
        Self {
            db,
            approval_threshold,
            lock_timeout_ms,
        }
    }

    /// Creates a transaction, validates it, and persists the outcome.
    ///
    /// The wallet row is locked while the pipeline runs so the balance and
    /// the outstanding debit total cannot drift under the decision. An
    /// approved amount is applied to the wallet balance in the same database
    /// transaction; an amount above the approval threshold is stored as
    /// `AWAITING_APPROVAL` and touches no balance. A rejection is stored on
    /// the row with its message, not raised as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The wallet does not exist
    /// - The wallet row lock times out
    /// - The database operation fails
    pub async fn create_transaction(
        &self,
        wallet_id: Uuid,
        kind: ledger::TransactionKind,
        amount: Decimal,
    ) -> Result<transactions::Model, TransactionError> {
        let txn = self.db.begin().await?;
        bound_lock_waits(&txn, self.lock_timeout_ms).await?;

        let wallet = wallets::Entity::find_by_id(wallet_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|err| busy_or_database(err, wallet_id))?
            .ok_or(TransactionError::WalletNotFound(wallet_id))?;

        let pending = self.outstanding_totals(&txn, wallet_id).await?;

        let draft = ledger::TransactionDraft {
            wallet_id: WalletId::from_uuid(wallet_id),
            kind,
            amount,
        };
        let snapshot = ledger::WalletSnapshot {
            id: WalletId::from_uuid(wallet.id),
            balance: wallet.balance,
        };
        let outcome = ledger::evaluate(&ledger::ValidationContext {
            draft: &draft,
            wallet: &snapshot,
            pending: &pending,
            approval_threshold: self.approval_threshold,
        });

        let now = Utc::now().into();
        if outcome.status == ledger::TransactionStatus::Approved {
            let new_balance = ledger::apply_delta(wallet.balance, kind, amount);
            let mut wallet_update: wallets::ActiveModel = wallet.into();
            wallet_update.balance = Set(new_balance);
            wallet_update.updated_at = Set(now);
            wallet_update.update(&txn).await?;
        }

        let record = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            wallet_id: Set(wallet_id),
            kind: Set(kind.into()),
            status: Set(outcome.status.into()),
            amount: Set(amount),
            message: Set(outcome.message),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = record.insert(&txn).await?;

        txn.commit().await?;

        Ok(model)
    }

    /// Moves a transaction awaiting manual approval into the settlement queue.
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction with this ID is currently
    /// `AWAITING_APPROVAL`, or if the database operation fails.
    pub async fn approve_transaction(
        &self,
        id: Uuid,
    ) -> Result<transactions::Model, TransactionError> {
        let transaction = transactions::Entity::find_by_id(id)
            .filter(transactions::Column::Status.eq(TransactionStatus::AwaitingApproval))
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotAwaitingApproval(id))?;

        let mut update: transactions::ActiveModel = transaction.into();
        update.status = Set(TransactionStatus::Pending);
        update.updated_at = Set(Utc::now().into());

        let model = update.update(&self.db).await?;

        Ok(model)
    }

    /// Finds a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<transactions::Model>, TransactionError> {
        let transaction = transactions::Entity::find_by_id(id).one(&self.db).await?;

        Ok(transaction)
    }

    /// Sums outstanding debits for a wallet inside the open transaction.
    ///
    /// Rows in `PENDING` or `AWAITING_APPROVAL` are locked together with the
    /// wallet, so a settlement run cannot flip them mid-validation.
    async fn outstanding_totals(
        &self,
        txn: &DatabaseTransaction,
        wallet_id: Uuid,
    ) -> Result<ledger::PendingTotals, TransactionError> {
        let outstanding = transactions::Entity::find()
            .filter(transactions::Column::WalletId.eq(wallet_id))
            .filter(transactions::Column::Status.is_in([
                TransactionStatus::Pending,
                TransactionStatus::AwaitingApproval,
            ]))
            .lock_exclusive()
            .all(txn)
            .await
            .map_err(|err| busy_or_database(err, wallet_id))?;

        Ok(ledger::PendingTotals::tally(
            outstanding
                .into_iter()
                .map(|row| (row.kind.into(), row.status.into(), row.amount)),
        ))
    }
}

/// Bounds lock waits for the open database transaction.
///
/// `SET LOCAL` scopes the timeout to the transaction, so the pooled
/// connection is unaffected after commit or rollback.
pub(crate) async fn bound_lock_waits(
    txn: &DatabaseTransaction,
    timeout_ms: u64,
) -> Result<(), DbErr> {
    txn.execute_unprepared(&format!("SET LOCAL lock_timeout = '{timeout_ms}ms'"))
        .await?;

    Ok(())
}

fn busy_or_database(err: DbErr, wallet_id: Uuid) -> TransactionError {
    if is_lock_timeout(&err) {
        TransactionError::WalletBusy(wallet_id)
    } else {
        TransactionError::Database(err)
    }
}

/// True when Postgres canceled a statement because `lock_timeout` expired.
fn is_lock_timeout(err: &DbErr) -> bool {
    err.to_string().contains("lock timeout")
}
