//! Query conditions for dynamic `WHERE` clauses.
//!
//! A [`Condition`] is one `<column> <operator> $n` predicate over a validated
//! identifier. The value stays bound; [`Sql`] assigns the placeholder index
//! when the condition is appended.

use crate::error::JoblyResult;
use crate::ident::{Ident, IntoIdent};
use crate::sql::{Sql, SqlParam};
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// Comparison operator of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `column = value`
    Eq,
    /// `column > value`
    Gt,
    /// `column >= value`
    Gte,
    /// `column <= value`
    Lte,
    /// `column ILIKE value` (case-insensitive pattern)
    Ilike,
}

impl Op {
    pub fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lte => "<=",
            Op::Ilike => "ILIKE",
        }
    }
}

/// A single bound predicate.
#[derive(Debug, Clone)]
pub struct Condition {
    column: Ident,
    op: Op,
    value: SqlParam,
}

impl Condition {
    /// Create a condition from a column identifier, operator and value.
    pub fn new<I, T>(column: I, op: Op, value: T) -> JoblyResult<Self>
    where
        I: IntoIdent,
        T: ToSql + Send + Sync + 'static,
    {
        Ok(Self {
            column: column.into_ident()?,
            op,
            value: Arc::new(value),
        })
    }

    /// `column = value`
    pub fn eq<I, T>(column: I, value: T) -> JoblyResult<Self>
    where
        I: IntoIdent,
        T: ToSql + Send + Sync + 'static,
    {
        Self::new(column, Op::Eq, value)
    }

    /// `column > value`
    pub fn gt<I, T>(column: I, value: T) -> JoblyResult<Self>
    where
        I: IntoIdent,
        T: ToSql + Send + Sync + 'static,
    {
        Self::new(column, Op::Gt, value)
    }

    /// `column >= value`
    pub fn gte<I, T>(column: I, value: T) -> JoblyResult<Self>
    where
        I: IntoIdent,
        T: ToSql + Send + Sync + 'static,
    {
        Self::new(column, Op::Gte, value)
    }

    /// `column <= value`
    pub fn lte<I, T>(column: I, value: T) -> JoblyResult<Self>
    where
        I: IntoIdent,
        T: ToSql + Send + Sync + 'static,
    {
        Self::new(column, Op::Lte, value)
    }

    /// `column ILIKE '%needle%'`: case-insensitive substring match.
    ///
    /// `%` and `_` inside `needle` keep their pattern meaning.
    pub fn contains_ci<I>(column: I, needle: &str) -> JoblyResult<Self>
    where
        I: IntoIdent,
    {
        Self::new(column, Op::Ilike, format!("%{needle}%"))
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub(crate) fn append_to_sql(&self, sql: &mut Sql) {
        sql.push_ident_ref(&self.column);
        sql.push(" ");
        sql.push(self.op.as_sql());
        sql.push(" ");
        sql.push_param(Arc::clone(&self.value));
    }
}
