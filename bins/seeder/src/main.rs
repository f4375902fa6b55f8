//! Database seeder for Tesora development and testing.
//!
//! Seeds a demo user and a couple of wallets for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tesora_db::entities::{users, wallets};
use uuid::Uuid;

/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo wallet IDs (consistent for all seeds)
const DEMO_WALLET_IDS: [&str; 2] = [
    "00000000-0000-0000-0000-000000000011",
    "00000000-0000-0000-0000-000000000012",
];
/// Names for the demo wallets
const DEMO_WALLET_NAMES: [&str; 2] = ["Main Wallet", "Savings"];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = tesora_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo user...");
    seed_demo_user(&db).await;

    println!("Seeding demo wallets...");
    seed_demo_wallets(&db).await;

    println!("Seeding complete!");
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

/// Seeds the demo user.
async fn seed_demo_user(db: &DatabaseConnection) {
    // Check if the user already exists
    if users::Entity::find_by_id(demo_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo user already exists, skipping...");
        return;
    }

    let user = users::ActiveModel {
        id: Set(demo_user_id()),
        username: Set("demo".to_string()),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert demo user: {e}");
    } else {
        println!("  Created demo user: demo");
    }
}

/// Seeds two demo wallets with the default starting balance.
async fn seed_demo_wallets(db: &DatabaseConnection) {
    for (id, name) in DEMO_WALLET_IDS.iter().zip(DEMO_WALLET_NAMES) {
        let wallet_id = Uuid::parse_str(id).unwrap();

        if wallets::Entity::find_by_id(wallet_id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Wallet '{name}' already exists, skipping...");
            continue;
        }

        let wallet = wallets::ActiveModel {
            id: Set(wallet_id),
            user_id: Set(demo_user_id()),
            name: Set(name.to_string()),
            balance: Set(Decimal::new(1000, 0)),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = wallet.insert(db).await {
            eprintln!("Failed to insert wallet '{name}': {e}");
        } else {
            println!("  Created wallet: {name}");
        }
    }
}
