//! `SET` clause assembly for partial updates.
//!
//! A partial update only touches the fields the caller supplied. Given the
//! supplied `(field, value)` pairs and a table translating logical field names
//! to stored column names, [`sql_for_partial_update`] produces
//!
//! ```text
//! "first_name"=$1, "age"=$2        values: ["Aliya", 32]
//! ```
//!
//! Fields missing from the translation table are used as the column name
//! unchanged. Both the field names and the table are `&'static`, so column
//! names always come from code, never from request input.

use crate::error::{JoblyError, JoblyResult};
use crate::ident::Ident;
use crate::sql::{Sql, SqlParam};
use std::fmt::Write as _;

/// Logical field name -> stored column name.
pub type ColumnMap = &'static [(&'static str, &'static str)];

/// Output of [`sql_for_partial_update`]: one assignment per supplied field.
#[derive(Debug, Clone)]
pub struct PartialUpdate<V> {
    columns: Vec<Ident>,
    values: Vec<V>,
}

/// Stored column name for `field`, falling back to the field name itself.
pub fn column_for(field: &'static str, js_to_sql: ColumnMap) -> &'static str {
    js_to_sql
        .iter()
        .find(|(logical, _)| *logical == field)
        .map_or(field, |(_, column)| *column)
}

/// Build the `SET` assignments for the supplied fields, in input order.
///
/// Fails with [`JoblyError::InvalidRequest`] when `data` is empty: an update
/// with nothing to set is not valid SQL.
pub fn sql_for_partial_update<V>(
    data: impl IntoIterator<Item = (&'static str, V)>,
    js_to_sql: ColumnMap,
) -> JoblyResult<PartialUpdate<V>> {
    let mut columns = Vec::new();
    let mut values = Vec::new();
    for (field, value) in data {
        columns.push(Ident::quoted(column_for(field, js_to_sql))?);
        values.push(value);
    }

    if columns.is_empty() {
        return Err(JoblyError::invalid_request("No data"));
    }
    Ok(PartialUpdate { columns, values })
}

impl<V> PartialUpdate<V> {
    /// Comma-joined `"<column>"=$<n>` assignments, numbered from 1.
    pub fn set_cols(&self) -> String {
        let mut out = String::new();
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            column.write_sql(&mut out);
            let _ = write!(out, "=${}", i + 1);
        }
        out
    }

    /// Values in assignment order.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl PartialUpdate<SqlParam> {
    /// The assignments as a composable fragment.
    ///
    /// Rendered alone this equals [`PartialUpdate::set_cols`]; appended to a
    /// statement its placeholders follow whatever is already bound there.
    pub fn into_sql(self) -> Sql {
        let mut sql = Sql::empty();
        for (i, (column, value)) in self.columns.iter().zip(self.values).enumerate() {
            if i > 0 {
                sql.push(", ");
            }
            sql.push_ident_ref(column).push("=").push_param(value);
        }
        sql
    }
}
