//! `WHERE` clause assembly for filtered searches.
//!
//! Filters are optional; only the ones present contribute a predicate, and
//! predicates are appended in a fixed order joined by `AND`. With no filter
//! present the clause is empty.

use crate::condition::Condition;
use crate::error::{JoblyError, JoblyResult};
use crate::sql::Sql;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Search filters for companies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Inclusive lower bound on `num_employees`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_employees: Option<i32>,
    /// Inclusive upper bound on `num_employees`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn min_employees(mut self, min: i32) -> Self {
        self.min_employees = Some(min);
        self
    }

    pub fn max_employees(mut self, max: i32) -> Self {
        self.max_employees = Some(max);
        self
    }

    /// Reject `minEmployees > maxEmployees`. Call before building the clause.
    pub fn validate(&self) -> JoblyResult<()> {
        match (self.min_employees, self.max_employees) {
            (Some(min), Some(max)) if min > max => Err(JoblyError::invalid_request(
                "minEmployees must be <= maxEmployees",
            )),
            _ => Ok(()),
        }
    }

    /// Predicates in clause order: name, minEmployees, maxEmployees.
    pub fn conditions(&self) -> JoblyResult<Vec<Condition>> {
        let mut conditions = Vec::new();
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            conditions.push(Condition::contains_ci("name", name)?);
        }
        if let Some(min) = self.min_employees {
            conditions.push(Condition::gte("num_employees", min)?);
        }
        if let Some(max) = self.max_employees {
            conditions.push(Condition::lte("num_employees", max)?);
        }
        Ok(conditions)
    }

    /// `WHERE ...` fragment with placeholders numbered from 1, or an empty fragment.
    pub fn where_clause(&self) -> JoblyResult<Sql> {
        let mut sql = Sql::empty();
        sql.push_where_and(&self.conditions()?);
        Ok(sql)
    }
}

/// Search filters for jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    /// Case-insensitive substring of the job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Inclusive lower bound on `salary`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<i32>,
    /// `true` keeps only jobs with a non-zero equity; `false` adds nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn min_salary(mut self, min: i32) -> Self {
        self.min_salary = Some(min);
        self
    }

    pub fn has_equity(mut self, has_equity: bool) -> Self {
        self.has_equity = Some(has_equity);
        self
    }

    /// Reject a negative salary bound.
    pub fn validate(&self) -> JoblyResult<()> {
        match self.min_salary {
            Some(min) if min < 0 => Err(JoblyError::invalid_request("minSalary must be >= 0")),
            _ => Ok(()),
        }
    }

    /// Predicates in clause order: title, minSalary, hasEquity.
    pub fn conditions(&self) -> JoblyResult<Vec<Condition>> {
        let mut conditions = Vec::new();
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            conditions.push(Condition::contains_ci("title", title)?);
        }
        if let Some(min) = self.min_salary {
            conditions.push(Condition::gte("salary", min)?);
        }
        if self.has_equity == Some(true) {
            conditions.push(Condition::gt("equity", Decimal::ZERO)?);
        }
        Ok(conditions)
    }

    /// `WHERE ...` fragment with placeholders numbered from 1, or an empty fragment.
    pub fn where_clause(&self) -> JoblyResult<Sql> {
        let mut sql = Sql::empty();
        sql.push_where_and(&self.conditions()?);
        Ok(sql)
    }
}
