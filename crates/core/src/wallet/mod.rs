//! Wallet domain rules.
//!
//! Balance arithmetic lives in `ledger`; this module covers the rules
//! that apply to the wallet itself, currently naming.

pub mod name;

pub use name::{validate_name, WalletNameError};
