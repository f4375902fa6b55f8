//! Wallet balance arithmetic.

use rust_decimal::Decimal;

use super::types::TransactionKind;

/// Applies a settled transaction to a wallet balance.
///
/// This is the only place a balance moves: debits subtract, credits
/// add. Validation has already run by the time a caller gets here, and
/// the caller must hold the wallet's row lock until the new balance is
/// persisted.
#[must_use]
pub fn apply_delta(balance: Decimal, kind: TransactionKind, amount: Decimal) -> Decimal {
    match kind {
        TransactionKind::Debit => balance - amount,
        TransactionKind::Credit => balance + amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debit_subtracts() {
        assert_eq!(
            apply_delta(dec!(1000), TransactionKind::Debit, dec!(100)),
            dec!(900)
        );
    }

    #[test]
    fn test_credit_adds() {
        assert_eq!(
            apply_delta(dec!(1000), TransactionKind::Credit, dec!(250.50)),
            dec!(1250.50)
        );
    }

    #[test]
    fn test_scales_are_preserved() {
        assert_eq!(
            apply_delta(dec!(1000), TransactionKind::Debit, dec!(0.01)),
            dec!(999.99)
        );
    }

    /// Strategy for amounts with cent precision.
    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
        prop_oneof![Just(TransactionKind::Debit), Just(TransactionKind::Credit)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A debit followed by a credit of the same amount restores the
        /// original balance.
        #[test]
        fn prop_debit_and_credit_cancel(
            balance in amount_strategy(),
            amount in amount_strategy(),
        ) {
            let after_debit = apply_delta(balance, TransactionKind::Debit, amount);
            let restored = apply_delta(after_debit, TransactionKind::Credit, amount);
            prop_assert_eq!(restored, balance);
        }

        /// Folding a sequence of transactions nets out to the initial
        /// balance plus credits minus debits.
        #[test]
        fn prop_sequence_nets_out(
            initial in amount_strategy(),
            transactions in prop::collection::vec(
                (kind_strategy(), amount_strategy()),
                0..20,
            ),
        ) {
            let final_balance = transactions
                .iter()
                .fold(initial, |acc, (kind, amount)| apply_delta(acc, *kind, *amount));

            let credits: Decimal = transactions
                .iter()
                .filter(|(kind, _)| *kind == TransactionKind::Credit)
                .map(|(_, amount)| *amount)
                .sum();
            let debits: Decimal = transactions
                .iter()
                .filter(|(kind, _)| *kind == TransactionKind::Debit)
                .map(|(_, amount)| *amount)
                .sum();

            prop_assert_eq!(final_balance, initial + credits - debits);
        }

        /// Application order does not change the final balance.
        #[test]
        fn prop_order_independent(
            initial in amount_strategy(),
            transactions in prop::collection::vec(
                (kind_strategy(), amount_strategy()),
                0..20,
            ),
        ) {
            let forward = transactions
                .iter()
                .fold(initial, |acc, (kind, amount)| apply_delta(acc, *kind, *amount));
            let backward = transactions
                .iter()
                .rev()
                .fold(initial, |acc, (kind, amount)| apply_delta(acc, *kind, *amount));

            prop_assert_eq!(forward, backward);
        }
    }
}
