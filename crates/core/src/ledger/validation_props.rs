//! Property-based tests for the transaction validation pipeline.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tesora_shared::types::WalletId;

use super::types::{
    PendingTotals, TransactionDraft, TransactionKind, TransactionStatus, ValidationOutcome,
    WalletSnapshot,
};
use super::validation::{evaluate, insufficient_balance_message, ValidationContext};

/// Strategy to generate an arbitrary amount, including negatives and zero.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a strictly positive amount.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a non-negative amount (balances, pending totals).
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a transaction kind.
fn arb_kind() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![Just(TransactionKind::Debit), Just(TransactionKind::Credit)]
}

/// Helper to evaluate a draft against a wallet state.
fn run(
    kind: TransactionKind,
    amount: Decimal,
    balance: Decimal,
    pending_debits: Decimal,
    threshold: Decimal,
) -> ValidationOutcome {
    let draft = TransactionDraft {
        wallet_id: WalletId::new(),
        kind,
        amount,
    };
    let wallet = WalletSnapshot {
        id: draft.wallet_id,
        balance,
    };
    let pending = PendingTotals {
        debit_total: pending_debits,
    };
    evaluate(&ValidationContext {
        draft: &draft,
        wallet: &wallet,
        pending: &pending,
        approval_threshold: threshold,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Property: the pipeline always reaches a decisive outcome
    // =========================================================================

    /// Evaluation never leaves a draft in the queued state; that state
    /// is only entered through manual approval.
    #[test]
    fn prop_outcome_is_never_pending(
        kind in arb_kind(),
        amount in arb_amount(),
        balance in non_negative_amount(),
        pending in non_negative_amount(),
        threshold in non_negative_amount(),
    ) {
        let outcome = run(kind, amount, balance, pending, threshold);
        prop_assert_ne!(outcome.status, TransactionStatus::Pending);
    }

    /// A rejection message is stored exactly when the draft is rejected.
    #[test]
    fn prop_message_present_iff_rejected(
        kind in arb_kind(),
        amount in arb_amount(),
        balance in non_negative_amount(),
        pending in non_negative_amount(),
        threshold in non_negative_amount(),
    ) {
        let outcome = run(kind, amount, balance, pending, threshold);
        prop_assert_eq!(
            outcome.message.is_some(),
            outcome.is_rejected(),
            "status {:?} with message {:?}",
            outcome.status,
            outcome.message
        );
    }

    /// The pipeline is pure: the same inputs always produce the same outcome.
    #[test]
    fn prop_evaluation_is_deterministic(
        kind in arb_kind(),
        amount in arb_amount(),
        balance in non_negative_amount(),
        pending in non_negative_amount(),
        threshold in non_negative_amount(),
    ) {
        let first = run(kind, amount, balance, pending, threshold);
        let second = run(kind, amount, balance, pending, threshold);
        prop_assert_eq!(first, second);
    }

    // =========================================================================
    // Property: balance rules apply to debits only
    // =========================================================================

    /// A positive credit is never rejected, no matter how empty the
    /// wallet is or how much is already reserved.
    #[test]
    fn prop_positive_credit_never_rejected(
        amount in positive_amount(),
        balance in non_negative_amount(),
        pending in non_negative_amount(),
        threshold in non_negative_amount(),
    ) {
        let outcome = run(TransactionKind::Credit, amount, balance, pending, threshold);
        prop_assert_ne!(outcome.status, TransactionStatus::Rejected);
    }

    /// A debit larger than the stored balance is always rejected with
    /// the stored-balance message, regardless of pending debits.
    #[test]
    fn prop_debit_above_balance_rejected(
        balance in non_negative_amount(),
        excess in positive_amount(),
        pending in non_negative_amount(),
        threshold in non_negative_amount(),
    ) {
        let amount = balance + excess;
        let outcome = run(TransactionKind::Debit, amount, balance, pending, threshold);
        prop_assert_eq!(outcome.status, TransactionStatus::Rejected);
        prop_assert_eq!(
            outcome.message,
            Some(insufficient_balance_message(balance, amount))
        );
    }

    /// A positive debit fully covered by the effective balance is never
    /// rejected; the threshold alone decides its status.
    #[test]
    fn prop_covered_debit_decided_by_threshold(
        amount in positive_amount(),
        pending in non_negative_amount(),
        headroom in non_negative_amount(),
        threshold in non_negative_amount(),
    ) {
        let balance = pending + amount + headroom;
        let outcome = run(TransactionKind::Debit, amount, balance, pending, threshold);
        let expected = if amount > threshold {
            TransactionStatus::AwaitingApproval
        } else {
            TransactionStatus::Approved
        };
        prop_assert_eq!(outcome.status, expected);
    }
}
