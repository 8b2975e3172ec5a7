//! # jobly
//!
//! Postgres data access for a job board: companies, the jobs they post, and
//! the two SQL builders the lookups and updates are assembled from.
//!
//! ## Features
//!
//! - **Partial updates**: `sql_for_partial_update` turns the supplied fields of
//!   an update payload into a `"col"=$1, ...` clause and its values
//! - **Filtered search**: `CompanyFilter` / `JobFilter` render an optional
//!   `WHERE` clause with placeholders numbered in a fixed order
//! - **Placeholder-safe SQL**: every statement goes through `Sql`, which numbers
//!   `$n` itself and keeps values out of the SQL text
//! - **Transaction-friendly**: every operation takes `&impl GenericClient`, so a
//!   connection, a pooled client or a transaction all work
//! - **Typed errors**: `JoblyError` carries the HTTP status a handler should use
//!
//! ## Example
//!
//! ```ignore
//! use jobly::{Company, CompanyFilter, CompanyUpdate, JoblyConfig, create_pool};
//!
//! let pool = create_pool(&JoblyConfig::from_env()?)?;
//! let conn = pool.get().await?;
//!
//! let small = Company::find_all(&conn, &CompanyFilter::new().max_employees(10)).await?;
//! let renamed = Company::update(&conn, "c1", CompanyUpdate::new().name("C1 Inc")).await?;
//! ```

pub mod changeset;
pub mod client;
pub mod condition;
pub mod config;
pub mod error;
pub mod filter;
pub mod ident;
pub mod models;
pub mod monitor;
pub mod partial_update;
pub mod row;
pub mod sql;
pub mod validate;

#[cfg(test)]
mod testing;

pub use changeset::{ValidationCode, ValidationError, ValidationErrors};
pub use client::GenericClient;
pub use condition::{Condition, Op};
pub use config::JoblyConfig;
pub use error::{JoblyError, JoblyResult};
pub use filter::{CompanyFilter, JobFilter};
pub use ident::{Ident, IntoIdent};
pub use models::{Company, CompanyDetail, CompanyUpdate, Job, JobUpdate, NewCompany, NewJob};
pub use monitor::{QueryType, TracingClient};
pub use partial_update::{ColumnMap, PartialUpdate, sql_for_partial_update};
pub use row::{FromRow, RowExt};
pub use sql::{Sql, SqlParam, sql};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::create_pool;
