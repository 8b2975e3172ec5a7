//! In-crate test client that records statements instead of running them.

use crate::client::GenericClient;
use crate::error::JoblyResult;
use std::sync::Mutex;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub tag: Option<String>,
    pub sql: String,
    pub param_count: usize,
    /// `Debug` rendering of each bound value.
    pub params: Vec<String>,
}

/// Every query returns zero rows and every statement affects zero rows.
#[derive(Debug, Default)]
pub(crate) struct RecordingClient {
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, tag: Option<&str>, sql: &str, params: &[&(dyn ToSql + Sync)]) {
        self.calls.lock().unwrap().push(RecordedCall {
            tag: tag.map(str::to_string),
            sql: sql.to_string(),
            param_count: params.len(),
            params: params.iter().map(|p| format!("{p:?}")).collect(),
        });
    }
}

impl GenericClient for RecordingClient {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<Vec<Row>> {
        self.record(None, sql, params);
        Ok(Vec::new())
    }

    async fn query_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> JoblyResult<Vec<Row>> {
        self.record(Some(tag), sql, params);
        Ok(Vec::new())
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<u64> {
        self.record(None, sql, params);
        Ok(0)
    }

    async fn execute_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> JoblyResult<u64> {
        self.record(Some(tag), sql, params);
        Ok(0)
    }
}
