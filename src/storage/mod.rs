//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;
#[cfg(feature = "mysql")]
pub mod mysql;

pub use in_memory::{InMemoryCredentialService, InMemoryStudentService};
#[cfg(feature = "mongodb_backend")]
pub use mongodb::{MongoCredentialService, MongoStudentService};
#[cfg(feature = "mysql")]
pub use mysql::{MysqlCredentialService, MysqlStudentService};

use crate::config::{BackendConfig, BackendKind};
use crate::core::service::{CredentialService, StudentService};
use anyhow::Result;
use std::sync::Arc;

/// The pair of services a [`RecordStore`](crate::core::store::RecordStore) is built from
pub type Backends = (Arc<dyn StudentService>, Arc<dyn CredentialService>);

/// Open the configured backend
///
/// Selecting a backend whose cargo feature is disabled is an error.
pub async fn connect(config: &BackendConfig) -> Result<Backends> {
    match config.kind {
        BackendKind::InMemory => Ok((
            Arc::new(InMemoryStudentService::new()),
            Arc::new(InMemoryCredentialService::new()),
        )),
        BackendKind::Mysql => connect_mysql(config).await,
        BackendKind::Mongodb => connect_mongodb(config).await,
    }
}

#[cfg(feature = "mysql")]
async fn connect_mysql(config: &BackendConfig) -> Result<Backends> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("backend.url is required for the mysql backend"))?;

    let pool = sqlx::MySqlPool::connect(url).await?;
    mysql::ensure_schema(&pool).await?;
    tracing::info!("connected to MySQL backend");

    Ok((
        Arc::new(MysqlStudentService::new(pool.clone())),
        Arc::new(MysqlCredentialService::new(pool)),
    ))
}

#[cfg(not(feature = "mysql"))]
async fn connect_mysql(_config: &BackendConfig) -> Result<Backends> {
    anyhow::bail!("the mysql backend requires the `mysql` feature")
}

#[cfg(feature = "mongodb_backend")]
async fn connect_mongodb(config: &BackendConfig) -> Result<Backends> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("backend.url is required for the mongodb backend"))?;
    let name = config.database.as_deref().unwrap_or("student_management");

    let client = ::mongodb::Client::with_uri_str(url).await?;
    let database = client.database(name);
    tracing::info!(database = name, "connected to MongoDB backend");

    Ok((
        Arc::new(MongoStudentService::new(database.clone())),
        Arc::new(MongoCredentialService::new(database)),
    ))
}

#[cfg(not(feature = "mongodb_backend"))]
async fn connect_mongodb(_config: &BackendConfig) -> Result<Backends> {
    anyhow::bail!("the mongodb backend requires the `mongodb_backend` feature")
}
