//! Student records server
//!
//! Reads the YAML file named by `STUDENT_RECORDS_CONFIG` (built-in defaults
//! otherwise), opens the configured backend and serves the REST API.

use anyhow::Result;
use student_records::auth::provider_from_config;
use student_records::prelude::*;
use student_records::storage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_records=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let (students, credentials) = storage::connect(&config.backend).await?;
    let store = RecordStore::new(config.validation.clone(), students, credentials);
    store.seed(&config.seed).await?;

    let auth = provider_from_config(&config.auth);
    tracing::info!(
        backend = ?config.backend.kind,
        auth = auth.name(),
        "starting student records server"
    );

    ServerBuilder::new()
        .with_store(store)
        .with_auth(auth)
        .serve(&config.bind)
        .await
}
