//! Postgres enum mappings.
//!
//! The string values match the database enums exactly; `From`
//! conversions bridge to the domain enums in `tesora-core`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use tesora_core::ledger;

/// The `transaction_kind` database enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
pub enum TransactionKind {
    /// Withdrawal from a wallet.
    #[sea_orm(string_value = "DEBIT")]
    Debit,
    /// Deposit into a wallet.
    #[sea_orm(string_value = "CREDIT")]
    Credit,
}

/// The `transaction_status` database enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_status")]
pub enum TransactionStatus {
    /// Approved manually, queued for batch settlement.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Above the approval threshold, waiting for a manual decision.
    #[sea_orm(string_value = "AWAITING_APPROVAL")]
    AwaitingApproval,
    /// Settled; the wallet balance reflects this transaction.
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    /// Failed validation; the wallet balance is untouched.
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl From<TransactionKind> for ledger::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Debit => Self::Debit,
            TransactionKind::Credit => Self::Credit,
        }
    }
}

impl From<ledger::TransactionKind> for TransactionKind {
    fn from(kind: ledger::TransactionKind) -> Self {
        match kind {
            ledger::TransactionKind::Debit => Self::Debit,
            ledger::TransactionKind::Credit => Self::Credit,
        }
    }
}

impl From<TransactionStatus> for ledger::TransactionStatus {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Pending => Self::Pending,
            TransactionStatus::AwaitingApproval => Self::AwaitingApproval,
            TransactionStatus::Approved => Self::Approved,
            TransactionStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<ledger::TransactionStatus> for TransactionStatus {
    fn from(status: ledger::TransactionStatus) -> Self {
        match status {
            ledger::TransactionStatus::Pending => Self::Pending,
            ledger::TransactionStatus::AwaitingApproval => Self::AwaitingApproval,
            ledger::TransactionStatus::Approved => Self::Approved,
            ledger::TransactionStatus::Rejected => Self::Rejected,
        }
    }
}
