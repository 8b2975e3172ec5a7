use super::truncate_sql_bytes;
use super::types::QueryType;
use crate::client::GenericClient;
use crate::config::JoblyConfig;
use crate::error::JoblyResult;
use std::future::Future;
use std::time::Instant;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tracing::Level;

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN => tracing::warn!($($field)*),
            Level::INFO => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

/// A [`GenericClient`] that logs every statement it forwards.
#[derive(Debug, Clone)]
pub struct TracingClient<C> {
    client: C,
    level: Level,
    max_sql_length: Option<usize>,
}

impl<C: GenericClient> TracingClient<C> {
    /// Wrap `client`, logging at `DEBUG` with SQL truncated to 200 chars.
    pub fn new(client: C) -> Self {
        Self {
            client,
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }

    /// Wrap `client` using the SQL length limit from `config`.
    pub fn from_config(client: C, config: &JoblyConfig) -> Self {
        Self::new(client).max_sql_length(config.sql_log_max_len)
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub fn inner(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    pub(super) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    async fn observe<T, F>(
        &self,
        tag: Option<&str>,
        sql: &str,
        param_count: usize,
        count: impl Fn(&T) -> u64 + Send,
        run: F,
    ) -> JoblyResult<T>
    where
        F: Future<Output = JoblyResult<T>> + Send,
    {
        let tag = tag.unwrap_or("-");
        let query_type = QueryType::from_sql(sql);
        let shown = self.truncate_sql(sql);
        emit_at_level!(
            self.level,
            target: "jobly.sql",
            tag,
            query_type = %query_type,
            param_count,
            sql = %shown,
            "executing"
        );

        let start = Instant::now();
        let result = run.await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(value) => emit_at_level!(
                self.level,
                target: "jobly.sql",
                tag,
                elapsed_ms,
                rows = count(value),
                "completed"
            ),
            Err(err) => tracing::warn!(
                target: "jobly.sql",
                tag,
                elapsed_ms,
                error = %err,
                "failed"
            ),
        }
        result
    }
}

impl<C: GenericClient> GenericClient for TracingClient<C> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<Vec<Row>> {
        let run = self.client.query(sql, params);
        self.observe(None, sql, params.len(), |rows: &Vec<Row>| rows.len() as u64, run)
            .await
    }

    async fn query_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> JoblyResult<Vec<Row>> {
        let run = self.client.query_tagged(tag, sql, params);
        self.observe(Some(tag), sql, params.len(), |rows: &Vec<Row>| rows.len() as u64, run)
            .await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<u64> {
        let run = self.client.execute(sql, params);
        self.observe(None, sql, params.len(), |n: &u64| *n, run).await
    }

    async fn execute_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> JoblyResult<u64> {
        let run = self.client.execute_tagged(tag, sql, params);
        self.observe(Some(tag), sql, params.len(), |n: &u64| *n, run).await
    }
}
