//! Dynamic SQL builder.
//!
//! `Sql` composes statements from raw text and bound values without manual
//! placeholder bookkeeping: each bound value becomes `$1, $2, ...` in the
//! order it was pushed, including values carried in by appended fragments.
//!
//! # Example
//!
//! ```ignore
//! use jobly::sql;
//!
//! let mut q = sql("SELECT handle, name FROM companies");
//! if let Some(name) = name {
//!     q.push(" WHERE name ILIKE ").push_bind(format!("%{name}%"));
//! }
//! q.push(" ORDER BY name");
//!
//! let rows = q.fetch_all(&conn).await?;
//! ```

mod builder;
mod parts;


pub use builder::{Sql, SqlParam};

/// Start building a SQL statement.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}
