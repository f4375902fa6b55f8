//! Core business logic for Tesora.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Transaction validation pipeline and balance arithmetic
//! - `settlement` - Batch settlement planning and run reporting
//! - `wallet` - Wallet naming rules

pub mod ledger;
pub mod settlement;
pub mod wallet;
