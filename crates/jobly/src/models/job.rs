//! Jobs.

use super::double_option;
use crate::changeset::ValidationErrors;
use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::filter::JobFilter;
use crate::partial_update::{ColumnMap, sql_for_partial_update};
use crate::row::{FromRow, RowExt};
use crate::sql::{SqlParam, sql};
use crate::validate::{check_decimal_range, check_len, check_min, check_not_null};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_postgres::Row;

/// The updatable job fields share their column names.
pub const JOB_JS_TO_SQL: ColumnMap = &[];

const COLUMNS: &str = "id, title, salary, equity, company_handle";

/// A stored job. `equity` serializes as a decimal string, e.g. `"0.0004"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Payload for [`Job::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn new(title: impl Into<String>, company_handle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            salary: None,
            equity: None,
            company_handle: company_handle.into(),
        }
    }

    pub fn salary(mut self, salary: i32) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn equity(mut self, equity: Decimal) -> Self {
        self.equity = Some(equity);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_len(&mut errors, "title", &self.title, 1, usize::MAX);
        check_len(&mut errors, "companyHandle", &self.company_handle, 1, 25);
        if let Some(salary) = self.salary {
            check_min(&mut errors, "salary", salary, 0);
        }
        if let Some(equity) = self.equity {
            check_decimal_range(&mut errors, "equity", equity, Decimal::ZERO, Decimal::ONE);
        }
        errors.into_result()
    }
}

/// Payload for [`Job::update`]. `id` and `companyHandle` are not updatable.
///
/// `null` clears `salary` or `equity`; a `null` title fails validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub equity: Option<Option<Decimal>>,
}

impl JobUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    pub fn salary(mut self, salary: Option<i32>) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn equity(mut self, equity: Option<Decimal>) -> Self {
        self.equity = Some(equity);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_not_null(&mut errors, "title", &self.title);
        if let Some(Some(title)) = &self.title {
            check_len(&mut errors, "title", title, 1, usize::MAX);
        }
        if let Some(Some(salary)) = self.salary {
            check_min(&mut errors, "salary", salary, 0);
        }
        if let Some(Some(equity)) = self.equity {
            check_decimal_range(&mut errors, "equity", equity, Decimal::ZERO, Decimal::ONE);
        }
        errors.into_result()
    }

    /// Supplied fields as `(logical name, value)` pairs, in declaration order.
    pub fn into_changes(self) -> Vec<(&'static str, SqlParam)> {
        let mut changes: Vec<(&'static str, SqlParam)> = Vec::new();
        if let Some(Some(title)) = self.title {
            changes.push(("title", Arc::new(title) as SqlParam));
        }
        if let Some(salary) = self.salary {
            changes.push(("salary", Arc::new(salary) as SqlParam));
        }
        if let Some(equity) = self.equity {
            changes.push(("equity", Arc::new(equity) as SqlParam));
        }
        changes
    }
}

impl Job {
    /// Insert a new job. An unknown `companyHandle` is an invalid request.
    pub async fn create(conn: &impl GenericClient, data: NewJob) -> JoblyResult<Job> {
        data.validate()?;

        let mut q = sql("INSERT INTO jobs (title, salary, equity, company_handle) VALUES (");
        q.push_bind(data.title)
            .push(", ")
            .push_bind(data.salary)
            .push(", ")
            .push_bind(data.equity)
            .push(", ")
            .push_bind(data.company_handle)
            .push(") RETURNING ")
            .push(COLUMNS)
            .tag("job.create");
        let job: Job = q.fetch_one_as(conn).await?;

        tracing::debug!(id = job.id, company_handle = %job.company_handle, "created job");
        Ok(job)
    }

    /// All jobs matching `filter`, ordered by title.
    pub async fn find_all(conn: &impl GenericClient, filter: &JobFilter) -> JoblyResult<Vec<Job>> {
        filter.validate()?;

        let mut q = sql(format!("SELECT {COLUMNS} FROM jobs"));
        let where_clause = filter.where_clause()?;
        if !where_clause.is_empty() {
            q.push(" ").push_sql(where_clause);
        }
        q.push(" ORDER BY title").tag("job.find_all");
        q.fetch_all_as(conn).await
    }

    /// Jobs posted by one company, ordered by id.
    pub async fn find_by_company(
        conn: &impl GenericClient,
        company_handle: &str,
    ) -> JoblyResult<Vec<Job>> {
        let mut q = sql(format!("SELECT {COLUMNS} FROM jobs WHERE company_handle = "));
        q.push_bind(company_handle.to_string())
            .push(" ORDER BY id")
            .tag("job.find_by_company");
        q.fetch_all_as(conn).await
    }

    pub async fn get(conn: &impl GenericClient, id: i32) -> JoblyResult<Job> {
        sql(format!("SELECT {COLUMNS} FROM jobs WHERE id = "))
            .bind(id)
            .tagged("job.get")
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| no_job(id))
    }

    /// Apply a partial update and return the stored row.
    pub async fn update(conn: &impl GenericClient, id: i32, data: JobUpdate) -> JoblyResult<Job> {
        data.validate()?;
        let set = sql_for_partial_update(data.into_changes(), JOB_JS_TO_SQL)?;

        let mut q = sql("UPDATE jobs SET ");
        q.push_sql(set.into_sql())
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(COLUMNS)
            .tag("job.update");

        let job: Job = q.fetch_opt_as(conn).await?.ok_or_else(|| no_job(id))?;

        tracing::debug!(id = job.id, "updated job");
        Ok(job)
    }

    pub async fn remove(conn: &impl GenericClient, id: i32) -> JoblyResult<()> {
        let mut q = sql("DELETE FROM jobs WHERE id = ");
        q.push_bind(id).push(" RETURNING id").tag("job.remove");
        q.fetch_opt(conn).await?.ok_or_else(|| no_job(id))?;

        tracing::debug!(id, "removed job");
        Ok(())
    }
}

fn no_job(id: i32) -> JoblyError {
    JoblyError::not_found(format!("No job: {id}"))
}
