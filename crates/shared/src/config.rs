//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Batch settlement configuration.
    #[serde(default)]
    pub settlement: SettlementConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Upper bound on row-lock wait time before an operation fails
    /// with a transient error instead of blocking indefinitely.
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_lock_timeout_ms() -> u64 {
    5000
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Transactions above this amount require manual approval.
    #[serde(default = "default_approval_threshold")]
    pub approval_threshold: Decimal,
    /// Balance assigned to newly created wallets.
    #[serde(default = "default_initial_wallet_balance")]
    pub initial_wallet_balance: Decimal,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            approval_threshold: default_approval_threshold(),
            initial_wallet_balance: default_initial_wallet_balance(),
        }
    }
}

fn default_approval_threshold() -> Decimal {
    Decimal::new(1000, 0)
}

fn default_initial_wallet_balance() -> Decimal {
    Decimal::new(1000, 0)
}

/// Batch settlement configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Seconds between settlement runs.
    #[serde(default = "default_settlement_interval")]
    pub interval_secs: u64,
    /// Whether the background settlement loop runs at all.
    #[serde(default = "default_settlement_enabled")]
    pub enabled: bool,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_settlement_interval(),
            enabled: default_settlement_enabled(),
        }
    }
}

fn default_settlement_interval() -> u64 {
    60
}

fn default_settlement_enabled() -> bool {
    true
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TESORA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_apply_with_only_database_url() {
        temp_env::with_vars(
            [
                ("TESORA__DATABASE__URL", Some("postgres://localhost/tesora")),
                ("RUN_MODE", Some("nonexistent")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");

                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.database.lock_timeout_ms, 5000);
                assert_eq!(config.ledger.approval_threshold, dec!(1000));
                assert_eq!(config.ledger.initial_wallet_balance, dec!(1000));
                assert_eq!(config.settlement.interval_secs, 60);
                assert!(config.settlement.enabled);
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("TESORA__DATABASE__URL", Some("postgres://localhost/tesora")),
                ("TESORA__SERVER__PORT", Some("9090")),
                ("TESORA__LEDGER__APPROVAL_THRESHOLD", Some("500")),
                ("TESORA__SETTLEMENT__INTERVAL_SECS", Some("5")),
                ("TESORA__SETTLEMENT__ENABLED", Some("false")),
                ("RUN_MODE", Some("nonexistent")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");

                assert_eq!(config.server.port, 9090);
                assert_eq!(config.ledger.approval_threshold, dec!(500));
                assert_eq!(config.settlement.interval_secs, 5);
                assert!(!config.settlement.enabled);
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars(
            [
                ("TESORA__DATABASE__URL", None::<&str>),
                ("RUN_MODE", Some("nonexistent")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
