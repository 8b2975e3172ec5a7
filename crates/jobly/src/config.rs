//! Runtime configuration read from the environment.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `DATABASE_URL` | connection string | required |
//! | `DATABASE_URL_TEST` | used instead when `JOBLY_ENV=test` | required in test |
//! | `JOBLY_POOL_SIZE` | max pooled connections | `16` |
//! | `JOBLY_SQL_LOG_MAX_LEN` | SQL chars shown in log events | `200` |
//!
//! A `.env` file in the working directory is loaded first, if present.

use crate::error::{JoblyError, JoblyResult};

pub const DEFAULT_POOL_SIZE: usize = 16;
pub const DEFAULT_SQL_LOG_MAX_LEN: usize = 200;

/// Connection and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoblyConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Max pooled connections.
    pub pool_size: usize,
    /// SQL truncation length for [`TracingClient`](crate::monitor::TracingClient).
    pub sql_log_max_len: usize,
}

impl JoblyConfig {
    /// Configuration with defaults for everything but the URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            sql_log_max_len: DEFAULT_SQL_LOG_MAX_LEN,
        }
    }

    /// Load `.env` (if any), then read the process environment.
    pub fn from_env() -> JoblyResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(JoblyError::Config(format!("failed to load .env: {e}")));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> JoblyResult<Self> {
        let testing = lookup("JOBLY_ENV").as_deref() == Some("test");
        let url_var = if testing {
            "DATABASE_URL_TEST"
        } else {
            "DATABASE_URL"
        };
        let database_url = lookup(url_var)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| JoblyError::Config(format!("{url_var} is not set")))?;
        check_database_url(&database_url)?;

        let mut config = Self::new(database_url);
        if let Some(v) = lookup("JOBLY_POOL_SIZE") {
            config.pool_size = parse_positive("JOBLY_POOL_SIZE", &v)?;
        }
        if let Some(v) = lookup("JOBLY_SQL_LOG_MAX_LEN") {
            config.sql_log_max_len = parse_positive("JOBLY_SQL_LOG_MAX_LEN", &v)?;
        }
        Ok(config)
    }

    /// Set the max pool size.
    pub fn pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }

    /// Set the SQL truncation length for log events.
    pub fn sql_log_max_len(mut self, len: usize) -> Self {
        self.sql_log_max_len = len;
        self
    }
}

fn check_database_url(raw: &str) -> JoblyResult<()> {
    let parsed =
        url::Url::parse(raw).map_err(|e| JoblyError::Config(format!("invalid database URL: {e}")))?;
    match parsed.scheme() {
        "postgres" | "postgresql" => Ok(()),
        other => Err(JoblyError::Config(format!(
            "unsupported database URL scheme: {other}"
        ))),
    }
}

fn parse_positive(key: &str, raw: &str) -> JoblyResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(JoblyError::Config(format!(
            "{key} must be a positive integer, got {raw:?}"
        ))),
    }
}
