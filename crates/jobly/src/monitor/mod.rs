//! Statement logging through `tracing`.
//!
//! [`TracingClient`] wraps any [`GenericClient`](crate::GenericClient) and emits
//! events under the `jobly.sql` target:
//!
//! - before each statement: `tag`, `query_type`, `param_count`, `sql`
//!   (truncated), at the configured level;
//! - after it: `elapsed_ms` and the row count, at the same level, or a `WARN`
//!   event carrying the error.
//!
//! ```rust,ignore
//! use jobly::monitor::TracingClient;
//!
//! let conn = TracingClient::new(pool.get().await?).max_sql_length(120);
//! let companies = Company::find_all(&conn, &CompanyFilter::new()).await?;
//! ```

mod tracing_client;
mod types;


pub use tracing_client::TracingClient;
pub use types::QueryType;

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
