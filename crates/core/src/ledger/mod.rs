//! Transaction validation and balance logic.
//!
//! This module implements the core ledger functionality:
//! - Domain types for transaction creation
//! - The ordered validation pipeline that decides a transaction's outcome
//! - Balance arithmetic for settled transactions

pub mod balance;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use balance::apply_delta;
pub use types::{
    PendingTotals, TransactionDraft, TransactionKind, TransactionStatus, ValidationOutcome,
    WalletSnapshot,
};
pub use validation::{evaluate, Decision, ValidationContext};
