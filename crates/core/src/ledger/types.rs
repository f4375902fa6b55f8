//! Ledger domain types for transaction creation and validation.
//!
//! This module defines the core types used for creating and validating
//! wallet transactions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tesora_shared::types::WalletId;

/// Transaction kind: either Debit or Credit.
///
/// A debit withdraws funds from a wallet, a credit deposits funds into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Withdrawal from a wallet.
    Debit,
    /// Deposit into a wallet.
    Credit,
}

impl TransactionKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }

    /// Parses a kind from its string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DEBIT" => Some(Self::Debit),
            "CREDIT" => Some(Self::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction status in the settlement lifecycle.
///
/// A newly created transaction is stored with whatever status the
/// validation pipeline assigns: `Approved`, `AwaitingApproval`, or
/// `Rejected`. After that the valid transitions are:
/// - `AwaitingApproval` → `Pending` (manual approval)
/// - `Pending` → `Approved` (batch settlement)
///
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Approved manually, queued for batch settlement.
    Pending,
    /// Above the approval threshold, waiting for a manual decision.
    AwaitingApproval,
    /// Settled. The wallet balance reflects this transaction.
    Approved,
    /// Failed validation. The wallet balance is untouched.
    Rejected,
}

impl TransactionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::AwaitingApproval => "AWAITING_APPROVAL",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parses a status from its string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "AWAITING_APPROVAL" => Some(Self::AwaitingApproval),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the transaction has reached a final state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns true if the transaction is still in flight.
    ///
    /// Outstanding debits reserve wallet funds: they count against the
    /// effective balance of later debits even though the stored balance
    /// has not changed yet.
    #[must_use]
    pub const fn is_outstanding(&self) -> bool {
        matches!(self, Self::Pending | Self::AwaitingApproval)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction that has been requested but not yet validated.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    /// The wallet the transaction applies to.
    pub wallet_id: WalletId,
    /// Whether funds are withdrawn or deposited.
    pub kind: TransactionKind,
    /// The requested amount.
    pub amount: Decimal,
}

/// The state of a wallet as read under its row lock.
#[derive(Debug, Clone)]
pub struct WalletSnapshot {
    /// The wallet ID.
    pub id: WalletId,
    /// The stored balance at the time the lock was taken.
    pub balance: Decimal,
}

/// Sum of a wallet's outstanding debit amounts.
///
/// Callers must exclude the transaction currently being validated;
/// only *other* in-flight debits count against the effective balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingTotals {
    /// Total amount of outstanding debit transactions.
    pub debit_total: Decimal,
}

impl PendingTotals {
    /// Tallies outstanding debits from a set of open transactions.
    ///
    /// Credits and terminal transactions contribute nothing, so callers
    /// may pass a superset of rows without skewing the total.
    #[must_use]
    pub fn tally<I>(open_transactions: I) -> Self
    where
        I: IntoIterator<Item = (TransactionKind, TransactionStatus, Decimal)>,
    {
        let debit_total = open_transactions
            .into_iter()
            .filter(|(kind, status, _)| {
                *kind == TransactionKind::Debit && status.is_outstanding()
            })
            .map(|(_, _, amount)| amount)
            .sum();
        Self { debit_total }
    }
}

/// The outcome of running a draft through the validation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// The status the transaction is stored with.
    pub status: TransactionStatus,
    /// The rejection message, present exactly when `status` is `Rejected`.
    pub message: Option<String>,
}

impl ValidationOutcome {
    /// Returns true if the draft was rejected.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self.status, TransactionStatus::Rejected)
    }
}
