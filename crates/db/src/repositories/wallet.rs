//! Wallet repository for wallet creation and lookup.

use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use tesora_core::wallet::{WalletNameError, validate_name};
use uuid::Uuid;

use crate::entities::{users, wallets};

/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Wallet name failed validation.
    #[error(transparent)]
    Name(#[from] WalletNameError),

    /// Owning user does not exist.
    #[error("User with ID {0} not found")]
    UserNotFound(Uuid),

    /// Another wallet with the same name already exists for the user.
    #[error("Wallet with name '{name}' already exists for user with ID {user_id}.")]
    DuplicateName {
        /// The requested wallet name.
        name: String,
        /// The owning user.
        user_id: Uuid,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl WalletError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Name(err) => err.error_code(),
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::DuplicateName { .. } => "DUPLICATE_WALLET_NAME",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Short explanation of why the operation failed.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Name(err) => err.reason(),
            Self::UserNotFound(_) => "The user does not exist.",
            Self::DuplicateName { .. } => "Duplicate wallet name detected for the same user.",
            Self::Database(_) => "An unexpected database error occurred.",
        }
    }

    /// HTTP status code this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Name(err) => err.status_code(),
            Self::UserNotFound(_) => 404,
            Self::DuplicateName { .. } => 400,
            Self::Database(_) => 500,
        }
    }
}

/// Wallet repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct WalletRepository {
    db: DatabaseConnection,
    initial_balance: Decimal,
}

impl WalletRepository {
    /// Creates a new wallet repository.
    ///
    /// `initial_balance` is the opening balance every new wallet starts with.
    #[must_use]
    pub const fn new(db: DatabaseConnection, initial_balance: Decimal) -> Self {
        Self {
            db,
            initial_balance,
        }
    }

    /// Creates a new wallet for a user.
    ///
    /// Wallet names are unique per user ignoring case. The unique index
    /// backstops concurrent creations with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is blank or contains disallowed characters
    /// - The user does not exist
    /// - The user already has a wallet with this name
    pub async fn create_wallet(
        &self,
        user_id: Uuid,
        name: String,
    ) -> Result<wallets::Model, WalletError> {
        validate_name(&name)?;

        let user = users::Entity::find_by_id(user_id).one(&self.db).await?;
        if user.is_none() {
            return Err(WalletError::UserNotFound(user_id));
        }

        let existing = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .filter(
                Expr::expr(Func::lower(Expr::col(wallets::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(WalletError::DuplicateName { name, user_id });
        }

        let now = chrono::Utc::now().into();
        let wallet = wallets::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(name.clone()),
            balance: Set(self.initial_balance),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match wallet.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(err) if is_unique_violation(&err) => {
                Err(WalletError::DuplicateName { name, user_id })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Lists all wallets owned by a user, oldest first.
    ///
    /// Returns an empty list for unknown users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn wallets_by_user(&self, user_id: Uuid) -> Result<Vec<wallets::Model>, WalletError> {
        let wallets = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .order_by_asc(wallets::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(wallets)
    }

    /// Finds a wallet by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<wallets::Model>, WalletError> {
        let wallet = wallets::Entity::find_by_id(id).one(&self.db).await?;

        Ok(wallet)
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
