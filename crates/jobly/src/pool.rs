//! Connection pool utilities

use crate::config::JoblyConfig;
use crate::error::{JoblyError, JoblyResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Create a connection pool from a [`JoblyConfig`].
///
/// Uses `NoTls` and fast recycling; `pool_size` caps the connection count.
///
/// ```ignore
/// let config = JoblyConfig::from_env()?;
/// let pool = jobly::create_pool(&config)?;
/// let client = pool.get().await?;
/// let company = Company::get(&client, "c1").await?;
/// ```
pub fn create_pool(config: &JoblyConfig) -> JoblyResult<Pool> {
    let pg_config: tokio_postgres::Config = config
        .database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| JoblyError::Connection(e.to_string()))?;

    let manager_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(pg_config, NoTls, manager_config);
    Pool::builder(mgr)
        .max_size(config.pool_size)
        .build()
        .map_err(|e| JoblyError::Pool(e.to_string()))
}
