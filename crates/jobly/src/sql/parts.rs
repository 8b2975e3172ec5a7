/// A piece of a [`Sql`](super::Sql) statement.
#[derive(Debug, Clone)]
pub(crate) enum SqlPart {
    /// Literal SQL text.
    Raw(String),
    /// A `$n` placeholder; `n` is assigned at render time.
    Param,
}
