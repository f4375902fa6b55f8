//! Grouping and per-wallet balance math for settlement runs.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tesora_shared::types::{TransactionId, WalletId};

use crate::ledger::{apply_delta, TransactionKind};

/// A queued transaction picked up by a settlement run.
#[derive(Debug, Clone)]
pub struct QueuedTransaction {
    /// The transaction ID.
    pub id: TransactionId,
    /// The wallet the transaction settles against.
    pub wallet_id: WalletId,
    /// Whether funds are withdrawn or deposited.
    pub kind: TransactionKind,
    /// The transaction amount.
    pub amount: Decimal,
}

/// Groups queued transactions by wallet.
///
/// Queue order is preserved within each group, so transactions settle
/// against their wallet in the order they were picked up.
#[must_use]
pub fn group_by_wallet(
    transactions: Vec<QueuedTransaction>,
) -> HashMap<WalletId, Vec<QueuedTransaction>> {
    let mut groups: HashMap<WalletId, Vec<QueuedTransaction>> = HashMap::new();
    for transaction in transactions {
        groups
            .entry(transaction.wallet_id)
            .or_default()
            .push(transaction);
    }
    groups
}

/// The net effect of settling one wallet's group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSettlement {
    /// The wallet balance after every transaction in the group applied.
    pub closing_balance: Decimal,
    /// IDs of the settled transactions, in application order.
    pub settled: Vec<TransactionId>,
}

/// Applies a wallet's queued transactions to its balance, in order.
///
/// The fold is pure; persisting the closing balance and flipping the
/// transaction statuses is the caller's job, under the wallet's lock.
#[must_use]
pub fn settle_group(opening_balance: Decimal, group: &[QueuedTransaction]) -> GroupSettlement {
    let mut balance = opening_balance;
    let mut settled = Vec::with_capacity(group.len());
    for transaction in group {
        balance = apply_delta(balance, transaction.kind, transaction.amount);
        settled.push(transaction.id);
    }
    GroupSettlement {
        closing_balance: balance,
        settled,
    }
}
