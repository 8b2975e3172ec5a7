use super::parts::SqlPart;
use crate::client::GenericClient;
use crate::condition::Condition;
use crate::error::JoblyResult;
use crate::ident::{Ident, IntoIdent};
use crate::row::FromRow;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A bound parameter value.
pub type SqlParam = Arc<dyn ToSql + Sync + Send>;

/// A parameter-safe dynamic SQL builder.
///
/// `Sql` stores SQL pieces and parameters separately and generates `$1, $2, ...`
/// placeholders automatically in the final SQL string.
#[must_use]
#[derive(Clone, Default)]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<SqlParam>,
    tag: Option<String>,
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(initial_sql.into())],
            params: Vec::new(),
            tag: None,
        }
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Associate a tag used by logging clients.
    pub fn tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tag = Some(tag.into());
        self
    }

    /// Consuming counterpart of [`Sql::tag`].
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// `true` when nothing has been pushed (or only empty text).
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| match p {
            SqlPart::Raw(s) => s.is_empty(),
            SqlPart::Param => false,
        })
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a parameter placeholder and bind its value.
    pub fn push_bind<T>(&mut self, value: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.push_param(Arc::new(value))
    }

    /// Consuming counterpart of [`Sql::push_bind`].
    pub fn bind<T>(mut self, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.push_bind(value);
        self
    }

    /// Append a placeholder for an already type-erased value.
    pub fn push_param(&mut self, value: SqlParam) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.params.push(value);
        self
    }

    /// Append another `Sql` fragment, consuming it.
    ///
    /// Placeholders of `other` are renumbered to follow the ones already here.
    pub fn push_sql(&mut self, mut other: Sql) -> &mut Self {
        self.parts.append(&mut other.parts);
        self.params.append(&mut other.params);
        if self.tag.is_none() {
            self.tag = other.tag;
        }
        self
    }

    /// Append a SQL identifier (table/column), validating it first.
    pub fn push_ident<I>(&mut self, ident: I) -> JoblyResult<&mut Self>
    where
        I: IntoIdent,
    {
        let ident = ident.into_ident()?;
        Ok(self.push_ident_ref(&ident))
    }

    /// Append a pre-validated [`Ident`].
    pub fn push_ident_ref(&mut self, ident: &Ident) -> &mut Self {
        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => ident.write_sql(last),
            _ => {
                let mut s = String::new();
                ident.write_sql(&mut s);
                self.parts.push(SqlPart::Raw(s));
            }
        }
        self
    }

    /// Append a [`Condition`], keeping placeholder numbering in sync.
    pub fn push_condition(&mut self, condition: &Condition) -> &mut Self {
        condition.append_to_sql(self);
        self
    }

    /// Append conditions joined by `AND`. No-op for an empty slice.
    pub fn push_conditions_and(&mut self, conditions: &[Condition]) -> &mut Self {
        for (i, cond) in conditions.iter().enumerate() {
            if i > 0 {
                self.push(" AND ");
            }
            self.push_condition(cond);
        }
        self
    }

    /// Append `WHERE <c1> AND <c2> ...`. No-op for an empty slice.
    pub fn push_where_and(&mut self, conditions: &[Condition]) -> &mut Self {
        if conditions.is_empty() {
            return self;
        }
        self.push("WHERE ");
        self.push_conditions_and(conditions)
    }

    /// Render SQL with `$1, $2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        let mut idx = 0usize;
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param => {
                    idx += 1;
                    let _ = write!(out, "${idx}");
                }
            }
        }
        out
    }

    /// Bound values in placeholder order.
    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect()
    }

    fn prepare(&self) -> (String, Vec<&(dyn ToSql + Sync)>) {
        (self.to_sql(), self.params_ref())
    }
}

impl Sql {
    /// Execute the built SQL and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> JoblyResult<Vec<Row>> {
        let (sql, params) = self.prepare();
        match self.tag.as_deref() {
            Some(tag) => conn.query_tagged(tag, &sql, &params).await,
            None => conn.query(&sql, &params).await,
        }
    }

    /// Execute the built SQL and return all rows mapped to `T`.
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> JoblyResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute the built SQL and return the **first** row ([`NotFound`](crate::JoblyError::NotFound) if none).
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> JoblyResult<Row> {
        let (sql, params) = self.prepare();
        match self.tag.as_deref() {
            Some(tag) => conn.query_one_tagged(tag, &sql, &params).await,
            None => conn.query_one(&sql, &params).await,
        }
    }

    /// Execute the built SQL and return the **first** row mapped to `T`.
    pub async fn fetch_one_as<T: FromRow>(&self, conn: &impl GenericClient) -> JoblyResult<T> {
        let row = self.fetch_one(conn).await?;
        T::from_row(&row)
    }

    /// Execute the built SQL and return the first row, if any.
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> JoblyResult<Option<Row>> {
        let (sql, params) = self.prepare();
        match self.tag.as_deref() {
            Some(tag) => conn.query_opt_tagged(tag, &sql, &params).await,
            None => conn.query_opt(&sql, &params).await,
        }
    }

    /// Execute the built SQL and return at most one row mapped to `T`.
    pub async fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> JoblyResult<Option<T>> {
        let row = self.fetch_opt(conn).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute the built SQL and return affected row count.
    pub async fn execute(&self, conn: &impl GenericClient) -> JoblyResult<u64> {
        let (sql, params) = self.prepare();
        match self.tag.as_deref() {
            Some(tag) => conn.execute_tagged(tag, &sql, &params).await,
            None => conn.execute(&sql, &params).await,
        }
    }
}

impl std::fmt::Debug for Sql {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sql")
            .field("sql", &self.to_sql())
            .field("params", &self.params)
            .field("tag", &self.tag)
            .finish()
    }
}
