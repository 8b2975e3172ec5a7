//! Companies.

use super::double_option;
use super::job::Job;
use crate::changeset::ValidationErrors;
use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::filter::CompanyFilter;
use crate::partial_update::{ColumnMap, sql_for_partial_update};
use crate::row::{FromRow, RowExt};
use crate::sql::{SqlParam, sql};
use crate::validate::{check_len, check_min, check_not_null, check_url};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_postgres::Row;

/// Logical field name -> `companies` column.
pub const COMPANY_JS_TO_SQL: ColumnMap =
    &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// A stored company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// A company together with its jobs, ordered by job id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

/// Payload for [`Company::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub fn new(
        handle: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            handle: handle.into(),
            name: name.into(),
            description: description.into(),
            num_employees: None,
            logo_url: None,
        }
    }

    pub fn num_employees(mut self, num_employees: i32) -> Self {
        self.num_employees = Some(num_employees);
        self
    }

    pub fn logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_len(&mut errors, "handle", &self.handle, 1, 25);
        check_len(&mut errors, "name", &self.name, 1, usize::MAX);
        if let Some(n) = self.num_employees {
            check_min(&mut errors, "numEmployees", n, 0);
        }
        if let Some(url) = self.logo_url.as_deref() {
            check_url(&mut errors, "logoUrl", url);
        }
        errors.into_result()
    }
}

/// Payload for [`Company::update`]. `handle` is not updatable.
///
/// An absent key leaves the column alone. An explicit `null` clears the
/// nullable columns and fails validation for `name` and `description`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Some(name.into()));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn num_employees(mut self, num_employees: Option<i32>) -> Self {
        self.num_employees = Some(num_employees);
        self
    }

    pub fn logo_url(mut self, logo_url: Option<String>) -> Self {
        self.logo_url = Some(logo_url);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_not_null(&mut errors, "name", &self.name);
        check_not_null(&mut errors, "description", &self.description);
        if let Some(Some(name)) = &self.name {
            check_len(&mut errors, "name", name, 1, usize::MAX);
        }
        if let Some(Some(n)) = self.num_employees {
            check_min(&mut errors, "numEmployees", n, 0);
        }
        if let Some(Some(url)) = &self.logo_url {
            check_url(&mut errors, "logoUrl", url);
        }
        errors.into_result()
    }

    /// Supplied fields as `(logical name, value)` pairs, in declaration order.
    ///
    /// A `null` name or description is skipped; [`CompanyUpdate::validate`]
    /// rejects it first.
    pub fn into_changes(self) -> Vec<(&'static str, SqlParam)> {
        let mut changes: Vec<(&'static str, SqlParam)> = Vec::new();
        if let Some(Some(name)) = self.name {
            changes.push(("name", Arc::new(name) as SqlParam));
        }
        if let Some(Some(description)) = self.description {
            changes.push(("description", Arc::new(description) as SqlParam));
        }
        if let Some(num_employees) = self.num_employees {
            changes.push(("numEmployees", Arc::new(num_employees) as SqlParam));
        }
        if let Some(logo_url) = self.logo_url {
            changes.push(("logoUrl", Arc::new(logo_url) as SqlParam));
        }
        changes
    }
}

impl Company {
    /// Insert a new company.
    ///
    /// Fails with [`JoblyError::DuplicateResource`] if the handle is taken.
    pub async fn create(conn: &impl GenericClient, data: NewCompany) -> JoblyResult<Company> {
        data.validate()?;

        let existing = sql("SELECT handle FROM companies WHERE handle = ")
            .bind(data.handle.clone())
            .tagged("company.create.check")
            .fetch_opt(conn)
            .await?;
        if existing.is_some() {
            return Err(JoblyError::duplicate(format!(
                "Duplicate company: {}",
                data.handle
            )));
        }

        let mut q = sql(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) VALUES (",
        );
        q.push_bind(data.handle)
            .push(", ")
            .push_bind(data.name)
            .push(", ")
            .push_bind(data.description)
            .push(", ")
            .push_bind(data.num_employees)
            .push(", ")
            .push_bind(data.logo_url)
            .push(") RETURNING ")
            .push(COLUMNS)
            .tag("company.create");
        let company: Company = q.fetch_one_as(conn).await?;

        tracing::debug!(handle = %company.handle, "created company");
        Ok(company)
    }

    /// All companies matching `filter`, ordered by name.
    pub async fn find_all(
        conn: &impl GenericClient,
        filter: &CompanyFilter,
    ) -> JoblyResult<Vec<Company>> {
        filter.validate()?;

        let mut q = sql(format!("SELECT {COLUMNS} FROM companies"));
        let where_clause = filter.where_clause()?;
        if !where_clause.is_empty() {
            q.push(" ").push_sql(where_clause);
        }
        q.push(" ORDER BY name").tag("company.find_all");
        q.fetch_all_as(conn).await
    }

    /// One company by handle.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> JoblyResult<Company> {
        sql(format!("SELECT {COLUMNS} FROM companies WHERE handle = "))
            .bind(handle.to_string())
            .tagged("company.get")
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| no_company(handle))
    }

    /// One company by handle, with its jobs.
    pub async fn get_with_jobs(
        conn: &impl GenericClient,
        handle: &str,
    ) -> JoblyResult<CompanyDetail> {
        let company = Self::get(conn, handle).await?;
        let jobs = Job::find_by_company(conn, handle).await?;
        Ok(CompanyDetail { company, jobs })
    }

    /// Apply a partial update and return the stored row.
    pub async fn update(
        conn: &impl GenericClient,
        handle: &str,
        data: CompanyUpdate,
    ) -> JoblyResult<Company> {
        data.validate()?;
        let set = sql_for_partial_update(data.into_changes(), COMPANY_JS_TO_SQL)?;

        let mut q = sql("UPDATE companies SET ");
        q.push_sql(set.into_sql())
            .push(" WHERE handle = ")
            .push_bind(handle.to_string())
            .push(" RETURNING ")
            .push(COLUMNS)
            .tag("company.update");

        let company: Company = q
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| no_company(handle))?;

        tracing::debug!(handle = %company.handle, "updated company");
        Ok(company)
    }

    /// Delete a company (its jobs go with it).
    pub async fn remove(conn: &impl GenericClient, handle: &str) -> JoblyResult<()> {
        let mut q = sql("DELETE FROM companies WHERE handle = ");
        q.push_bind(handle.to_string())
            .push(" RETURNING handle")
            .tag("company.remove");
        q.fetch_opt(conn).await?.ok_or_else(|| no_company(handle))?;

        tracing::debug!(handle, "removed company");
        Ok(())
    }
}

fn no_company(handle: &str) -> JoblyError {
    JoblyError::not_found(format!("No company: {handle}"))
}
