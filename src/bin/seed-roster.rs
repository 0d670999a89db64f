//! One-shot roster seeding: make sure every configured candidate name exists.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use growing_minds_back::{
    config::AppConfig,
    dao::roster_store::mongodb::{MongoConfig, MongoRosterStore},
    services::roster_service,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load();
    if config.candidates().is_empty() {
        warn!("configuration lists no candidates; nothing to seed");
        return Ok(());
    }

    let mongo = MongoConfig::from_env()
        .await
        .context("loading MongoDB configuration")?;
    let store = MongoRosterStore::connect(mongo)
        .await
        .context("connecting to MongoDB")?;

    let outcome = roster_service::seed_roster(&store, config.candidates())
        .await
        .context("seeding roster")?;

    info!(
        created = outcome.created,
        existing = outcome.existing,
        "seeding completed"
    );
    Ok(())
}
