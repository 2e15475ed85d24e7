//! Seed the database with default country codes, policies and an API key.
//!
//! | Env Var         | Default                     |
//! |-----------------|-----------------------------|
//! | `DATABASE_URL`  | required                    |
//! | `SEED_API_KEY`  | generated if no key exists  |
//! | `SEED_APP_NAME` | `reporter-admin`            |
//!
//! Safe to run repeatedly.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reporter_db::seed::{self, SeedApiKey, DEFAULT_APP_NAME};
use reporter_db::stores::Stores;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reporter_db=info,reporter_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = reporter_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    reporter_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let api_key = SeedApiKey {
        app_name: std::env::var("SEED_APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.into()),
        plaintext: std::env::var("SEED_API_KEY").ok().filter(|k| !k.trim().is_empty()),
    };

    let report = seed::run(&Stores::postgres(&pool), Some(&api_key))
        .await
        .context("Seeding failed")?;

    if let Some(plaintext) = &report.api_key_created {
        if api_key.plaintext.is_none() {
            // Only the digest is stored; this is the only chance to copy it.
            println!("Generated API key for {}: {plaintext}", api_key.app_name);
        }
    }

    pool.close().await;
    Ok(())
}
