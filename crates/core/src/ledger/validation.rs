//! The ordered validation pipeline for new transactions.
//!
//! Every transaction request runs through the same fixed sequence of
//! pure stages. Each stage inspects the draft together with wallet
//! state read under the wallet's row lock and either lets the draft
//! continue, rejects it with a stored message, or assigns its final
//! status.

use rust_decimal::Decimal;

use super::types::{
    PendingTotals, TransactionDraft, TransactionKind, TransactionStatus, ValidationOutcome,
    WalletSnapshot,
};

/// Rejection message stored for a negative amount.
pub const NEGATIVE_AMOUNT_MESSAGE: &str = "The amount can not be less than zero.";

/// Rejection message stored for a zero amount.
pub const ZERO_AMOUNT_MESSAGE: &str = "The amount can not be zero.";

/// What a single pipeline stage decided about a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The stage has no objection; the next stage runs.
    Continue,
    /// The draft is rejected; the message is stored on the transaction.
    Reject {
        /// Human-readable explanation recorded on the rejected transaction.
        message: String,
    },
    /// The stage assigns the final status; no further stages run.
    SetStatus(TransactionStatus),
}

/// Everything a pipeline stage is allowed to look at.
///
/// The wallet snapshot and pending totals must be read under the
/// wallet's row lock and stay valid until the outcome is persisted.
#[derive(Debug)]
pub struct ValidationContext<'a> {
    /// The transaction being validated.
    pub draft: &'a TransactionDraft,
    /// The wallet the draft applies to.
    pub wallet: &'a WalletSnapshot,
    /// Outstanding debits on the same wallet, excluding the draft itself.
    pub pending: &'a PendingTotals,
    /// Amounts strictly above this threshold require manual approval.
    pub approval_threshold: Decimal,
}

type Stage = fn(&ValidationContext<'_>) -> Decision;

/// Stage order is load-bearing. The balance stage runs before the sign
/// checks, so a zero-amount debit against a wallet whose funds are
/// already reserved rejects with the insufficient-funds message rather
/// than the zero-amount one. Reordering changes stored rejection
/// messages.
const PIPELINE: [Stage; 4] = [
    check_balance,
    check_negative_amount,
    check_zero_amount,
    check_approval_threshold,
];

/// Runs a draft through the pipeline and returns its final status.
///
/// The outcome is always decisive: `Approved`, `AwaitingApproval`, or
/// `Rejected` with a message. `Pending` is never assigned here; it only
/// enters the lifecycle through manual approval.
#[must_use]
pub fn evaluate(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    for stage in PIPELINE {
        match stage(ctx) {
            Decision::Continue => {}
            Decision::Reject { message } => {
                return ValidationOutcome {
                    status: TransactionStatus::Rejected,
                    message: Some(message),
                };
            }
            Decision::SetStatus(status) => {
                return ValidationOutcome {
                    status,
                    message: None,
                };
            }
        }
    }
    unreachable!("the approval threshold stage always assigns a status")
}

/// Rejects debits the wallet cannot cover.
///
/// Credits pass untouched. For debits the stored balance is checked
/// first; only when it covers the amount is the effective balance
/// (stored balance minus outstanding debits) checked as well. The two
/// failures store different messages.
fn check_balance(ctx: &ValidationContext<'_>) -> Decision {
    if ctx.draft.kind == TransactionKind::Credit {
        return Decision::Continue;
    }

    let balance = ctx.wallet.balance;
    let amount = ctx.draft.amount;

    if balance < amount {
        return Decision::Reject {
            message: insufficient_balance_message(balance, amount),
        };
    }

    let effective = balance - ctx.pending.debit_total;
    if effective < amount {
        return Decision::Reject {
            message: insufficient_effective_balance_message(
                balance,
                ctx.pending.debit_total,
                amount,
            ),
        };
    }

    Decision::Continue
}

fn check_negative_amount(ctx: &ValidationContext<'_>) -> Decision {
    if ctx.draft.amount < Decimal::ZERO {
        return Decision::Reject {
            message: NEGATIVE_AMOUNT_MESSAGE.to_owned(),
        };
    }
    Decision::Continue
}

fn check_zero_amount(ctx: &ValidationContext<'_>) -> Decision {
    if ctx.draft.amount.is_zero() {
        return Decision::Reject {
            message: ZERO_AMOUNT_MESSAGE.to_owned(),
        };
    }
    Decision::Continue
}

/// Assigns the final status. Amounts strictly above the threshold wait
/// for a manual decision; everything else is approved on the spot.
fn check_approval_threshold(ctx: &ValidationContext<'_>) -> Decision {
    if ctx.draft.amount > ctx.approval_threshold {
        Decision::SetStatus(TransactionStatus::AwaitingApproval)
    } else {
        Decision::SetStatus(TransactionStatus::Approved)
    }
}

/// Builds the rejection message for a stored balance that cannot cover
/// the requested amount.
#[must_use]
pub fn insufficient_balance_message(balance: Decimal, amount: Decimal) -> String {
    format!(
        "The wallet has insufficient funds. Current balance is {balance}, but the transaction amount is {amount}."
    )
}

/// Builds the rejection message for a balance that covers the amount
/// only if outstanding debits are ignored.
#[must_use]
pub fn insufficient_effective_balance_message(
    balance: Decimal,
    pending_total: Decimal,
    amount: Decimal,
) -> String {
    format!(
        "The wallet has insufficient funds. Current balance is {balance}, pending debit transactions total {pending_total}, but the transaction amount is {amount}."
    )
}
