//! Tesora API Server
//!
//! Main entry point for the Tesora ledger service.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tesora_api::{AppState, create_router};
use tesora_db::{SettlementProcessor, connect_with};
use tesora_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tesora=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    // Start the background settlement loop
    if config.settlement.enabled {
        tokio::spawn(settlement_loop(
            db.clone(),
            config.settlement.interval_secs,
            config.database.lock_timeout_ms,
        ));
        info!(
            interval_secs = config.settlement.interval_secs,
            "Settlement loop started"
        );
    } else {
        info!("Settlement loop disabled");
    }

    // Create application state
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(config),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Drives batch settlement on a fixed cadence. Each run is awaited before
/// the next tick, so runs never overlap.
async fn settlement_loop(db: DatabaseConnection, interval_secs: u64, lock_timeout_ms: u64) {
    let processor = SettlementProcessor::new(db, lock_timeout_ms);
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if let Err(e) = processor.run().await {
            error!(error = %e, "Settlement run failed");
        }
    }
}
