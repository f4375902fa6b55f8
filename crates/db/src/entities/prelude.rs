//! Re-exports of all entities.

pub use super::transactions::Entity as Transactions;
pub use super::users::Entity as Users;
pub use super::wallets::Entity as Wallets;
