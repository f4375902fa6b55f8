//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod settlement;
pub mod transaction;
pub mod user;
pub mod wallet;

pub use settlement::{SettlementError, SettlementProcessor};
pub use transaction::{TransactionError, TransactionRepository};
pub use user::UserRepository;
pub use wallet::{WalletError, WalletRepository};
