//! Outcome reporting for settlement runs.

use tesora_shared::types::WalletId;

/// How one wallet's group fared in a settlement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupResult {
    /// The group settled and its transactions were approved.
    Settled {
        /// Number of transactions applied to the wallet.
        transactions: usize,
    },
    /// The group was skipped; its transactions stay queued for the
    /// next run.
    Skipped {
        /// Why the group could not settle.
        reason: String,
    },
}

/// Per-wallet outcome of a settlement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletOutcome {
    /// The wallet whose group this describes.
    pub wallet_id: WalletId,
    /// What happened to the group.
    pub result: GroupResult,
}

/// Summary of one settlement run.
///
/// Every wallet group that the run touched appears exactly once, as
/// either settled or skipped with a reason.
#[derive(Debug, Clone, Default)]
pub struct SettlementReport {
    /// One outcome per wallet group, in processing order.
    pub outcomes: Vec<WalletOutcome>,
}

impl SettlementReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Records a group that settled.
    pub fn record_settled(&mut self, wallet_id: WalletId, transactions: usize) {
        self.outcomes.push(WalletOutcome {
            wallet_id,
            result: GroupResult::Settled { transactions },
        });
    }

    /// Records a group that was skipped.
    pub fn record_skipped(&mut self, wallet_id: WalletId, reason: String) {
        self.outcomes.push(WalletOutcome {
            wallet_id,
            result: GroupResult::Skipped { reason },
        });
    }

    /// Number of wallet groups that settled.
    #[must_use]
    pub fn settled_groups(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.result, GroupResult::Settled { .. }))
            .count()
    }

    /// Number of wallet groups that were skipped.
    #[must_use]
    pub fn skipped_groups(&self) -> usize {
        self.outcomes.len() - self.settled_groups()
    }

    /// Total transactions settled across all groups.
    #[must_use]
    pub fn settled_transactions(&self) -> usize {
        self.outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                GroupResult::Settled { transactions } => *transactions,
                GroupResult::Skipped { .. } => 0,
            })
            .sum()
    }

    /// True when the run found nothing to settle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = SettlementReport::new();
        assert!(report.is_empty());
        assert_eq!(report.settled_groups(), 0);
        assert_eq!(report.skipped_groups(), 0);
        assert_eq!(report.settled_transactions(), 0);
    }

    #[test]
    fn test_counts_split_by_outcome() {
        let mut report = SettlementReport::new();
        report.record_settled(WalletId::new(), 3);
        report.record_settled(WalletId::new(), 1);
        report.record_skipped(WalletId::new(), "wallet not found".to_owned());

        assert!(!report.is_empty());
        assert_eq!(report.settled_groups(), 2);
        assert_eq!(report.skipped_groups(), 1);
        assert_eq!(report.settled_transactions(), 4);
    }

    #[test]
    fn test_outcomes_keep_processing_order() {
        let first = WalletId::new();
        let second = WalletId::new();
        let mut report = SettlementReport::new();
        report.record_skipped(first, "wallet not found".to_owned());
        report.record_settled(second, 2);

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].wallet_id, first);
        assert!(matches!(
            report.outcomes[0].result,
            GroupResult::Skipped { .. }
        ));
        assert_eq!(report.outcomes[1].wallet_id, second);
        assert!(matches!(
            report.outcomes[1].result,
            GroupResult::Settled { transactions: 2 }
        ));
    }
}
