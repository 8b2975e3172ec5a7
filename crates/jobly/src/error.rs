//! Error types for jobly

use crate::changeset::ValidationErrors;
use thiserror::Error;

/// Result type alias for jobly operations
pub type JoblyResult<T> = Result<T, JoblyError>;

/// Error types for data-access operations
#[derive(Debug, Error)]
pub enum JoblyError {
    /// Malformed request: empty update payload, bad filter bounds, dangling reference
    #[error("Bad request: {0}")]
    InvalidRequest(String),

    /// Target row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Create collided with an existing unique key
    #[error("Duplicate resource: {0}")]
    DuplicateResource(String),

    /// Payload failed field validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Identifier rejected before being rendered into SQL
    #[error("Invalid identifier: {0}")]
    InvalidIdent(String),

    /// Caller is not allowed to perform the operation
    #[error("Unauthorized")]
    Unauthorized,

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JoblyError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_ident(message: impl Into<String>) -> Self {
        Self::InvalidIdent(message.into())
    }

    /// Create a duplicate resource error
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::DuplicateResource(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateResource(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status a route handler should answer with for this error.
    ///
    /// Anything not explicitly recognized is an internal failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidRequest(_) | Self::DuplicateResource(_) | Self::Validation(_) => 400,
            Self::Unauthorized => 401,
            _ => 500,
        }
    }

    /// Parse a tokio_postgres error into a more specific JoblyError
    ///
    /// - `23505` unique violation -> [`JoblyError::DuplicateResource`]
    /// - `23503` foreign key violation -> [`JoblyError::InvalidRequest`]
    /// - `23514` check violation -> [`JoblyError::InvalidRequest`]
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::DuplicateResource(format!("{constraint}: {message}")),
                "23503" | "23514" => {
                    return Self::InvalidRequest(format!("{constraint}: {message}"));
                }
                _ => {}
            }
        }
        Self::Query(err)
    }
}

impl From<ValidationErrors> for JoblyError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for JoblyError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
