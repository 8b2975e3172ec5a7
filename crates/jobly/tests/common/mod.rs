//! Shared setup for the database-backed tests.
//!
//! Each test opens its own connection and runs inside a transaction that is
//! never committed. The tables live in a fresh schema so tests never see each
//! other's rows or anything already in the target database.

#![allow(dead_code)]

use jobly::{JoblyError, JoblyResult};
use tokio_postgres::{Client, NoTls, Transaction};

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Connect to `DATABASE_URL`, or `None` when it is not set.
pub async fn connect(test_name: &str) -> JoblyResult<Option<Client>> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping {test_name}");
            return Ok(None);
        }
    };

    let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
        .await
        .map_err(|e| JoblyError::Connection(e.to_string()))?;
    tokio::spawn(async move {
        let _ = connection.await;
    });
    Ok(Some(client))
}

/// Open a transaction with the schema created and the fixture rows loaded.
///
/// Companies `c1`..`c3` (named `C1`..`C3`, 1..3 employees); jobs `J1`, `J2`
/// at `c1` (with equity) and `J3` at `c2` (without).
pub async fn seeded(client: &mut Client) -> JoblyResult<Transaction<'_>> {
    let tx = client.transaction().await?;

    let schema = format!("jobly_test_{}", uuid::Uuid::new_v4().simple());
    tx.batch_execute(&format!(
        "CREATE SCHEMA {schema}; SET LOCAL search_path TO {schema};"
    ))
    .await?;
    tx.batch_execute(SCHEMA_SQL).await?;

    tx.batch_execute(
        "INSERT INTO companies (handle, name, num_employees, description, logo_url) VALUES
           ('c1', 'C1', 1, 'Desc1', 'http://c1.img'),
           ('c2', 'C2', 2, 'Desc2', 'http://c2.img'),
           ('c3', 'C3', 3, 'Desc3', 'http://c3.img');
         INSERT INTO jobs (title, salary, equity, company_handle) VALUES
           ('J1', 10000, 0.1, 'c1'),
           ('J2', 20000, 0.2, 'c1'),
           ('J3', 30000, NULL, 'c2');",
    )
    .await?;

    Ok(tx)
}
