//! Batch settlement of queued transactions.
//!
//! A settlement run drains the queue of manually approved transactions,
//! applies each wallet's group under that wallet's row lock, and
//! reports the outcome per wallet. One wallet's failure never blocks
//! another wallet's group.

pub mod plan;
pub mod report;

pub use plan::{group_by_wallet, settle_group, GroupSettlement, QueuedTransaction};
pub use report::{GroupResult, SettlementReport, WalletOutcome};
