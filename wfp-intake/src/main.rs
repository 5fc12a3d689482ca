//! wfp-intake - Webform intake microservice
//!
//! Receives webform submissions over HTTP, deduplicates signers against
//! the contact store through the configured matching rules, records
//! provenance activities, and maintains group membership.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wfp_intake::config::IntakeSettings;
use wfp_intake::store::SqliteStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wfp_intake=info,wfp_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting wfp-intake (Webform Intake) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = wfp_common::config::resolve_config_path("WFP_INTAKE_CONFIG", "intake");
    let config = wfp_common::config::load_config(config_path.as_deref())?;
    let settings = IntakeSettings::from_config(config)?;

    info!("Database: {}", settings.database_path.display());
    let pool = wfp_common::db::open_pool(&settings.database_path).await?;
    wfp_intake::db::create_schema(&pool)
        .await
        .context("Failed to create intake schema")?;

    let store = Arc::new(SqliteStore::new(pool));
    let state = wfp_intake::init_pipeline(store, &settings).await?;
    let app = wfp_intake::build_router(state);

    let bind = format!("{}:{}", settings.bind_address, settings.port);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Listening on http://{}", bind);
    info!("Health check: http://{}/health", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
