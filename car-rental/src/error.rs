//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use thiserror::Error;

use crate::templates::{ErrorTemplate, HtmlTemplate, TemplateContext};

// ============================================================================
// Structured Database Errors
// ============================================================================

/// Database operation being performed when the error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseOperation {
    /// Establishing a database connection
    Connect,
    /// Executing a query
    Query,
    /// Inserting records
    Insert,
    /// Updating records
    Update,
    /// Deleting records
    Delete,
    /// Running database migrations
    Migration,
    /// Acquiring a connection from the pool
    PoolAcquire,
}

impl fmt::Display for DatabaseOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => write!(f, "connect"),
            Self::Query => write!(f, "query"),
            Self::Insert => write!(f, "insert"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Migration => write!(f, "migration"),
            Self::PoolAcquire => write!(f, "pool_acquire"),
        }
    }
}

/// Category of database error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseErrorKind {
    /// Failed to establish connection
    ConnectionFailed,
    /// Record not found
    NotFound,
    /// Constraint violation (unique, foreign key, check)
    ConstraintViolation,
    /// Query execution failed
    QueryFailed,
    /// Type conversion error
    TypeConversion,
    /// Configuration error
    Configuration,
    /// Operation timed out
    Timeout,
    /// Connection pool exhausted
    PoolExhausted,
    /// Other/unknown error
    Other,
}

impl fmt::Display for DatabaseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::NotFound => write!(f, "not_found"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::QueryFailed => write!(f, "query_failed"),
            Self::TypeConversion => write!(f, "type_conversion"),
            Self::Configuration => write!(f, "configuration"),
            Self::Timeout => write!(f, "timeout"),
            Self::PoolExhausted => write!(f, "pool_exhausted"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured database error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseError {
    /// The operation being performed when the error occurred
    pub operation: DatabaseOperation,
    /// The category of error
    pub kind: DatabaseErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Additional context (e.g., table name)
    pub context: Option<String>,
}

impl DatabaseError {
    /// Create a new database error
    pub fn new(
        operation: DatabaseOperation,
        kind: DatabaseErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Create a "not found" error
    pub fn not_found(operation: DatabaseOperation, message: impl Into<String>) -> Self {
        Self::new(operation, DatabaseErrorKind::NotFound, message)
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(
            DatabaseOperation::Connect,
            DatabaseErrorKind::ConnectionFailed,
            message,
        )
    }

    /// Create a constraint violation error
    pub fn constraint_violation(operation: DatabaseOperation, message: impl Into<String>) -> Self {
        Self::new(operation, DatabaseErrorKind::ConstraintViolation, message)
    }

    /// Create a pool exhausted error
    pub fn pool_exhausted(message: impl Into<String>) -> Self {
        Self::new(
            DatabaseOperation::PoolAcquire,
            DatabaseErrorKind::PoolExhausted,
            message,
        )
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            DatabaseErrorKind::ConnectionFailed
                | DatabaseErrorKind::Timeout
                | DatabaseErrorKind::PoolExhausted
        )
    }

    /// Add context to an existing error
    pub fn add_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Database {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(ref ctx) = self.context {
            write!(f, " [context: {}]", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for DatabaseError {}

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the application
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Structured database error with operation context
    #[error("{0}")]
    Database(DatabaseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authorization error
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource conflict (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Session error
    #[error("Session error: {0}")]
    Session(String),

    /// Authentication machinery error (password hashing)
    #[error("Auth error: {0}")]
    Auth(String),
}

impl Error {
    /// Whether the store refused a write because of a unique, foreign-key or
    /// check constraint.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::Database(DatabaseError {
                kind: DatabaseErrorKind::ConstraintViolation,
                ..
            })
        )
    }

    /// Whether the error means the addressed row does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::Database(DatabaseError {
                    kind: DatabaseErrorKind::NotFound,
                    ..
                })
        )
    }

    /// Status code and user-facing title/message for the error page.
    ///
    /// Internal details are logged here and never rendered.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            Error::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                internal()
            }
            Error::Database(e) => {
                match e.kind {
                    DatabaseErrorKind::NotFound => tracing::debug!(
                        operation = %e.operation,
                        context = ?e.context,
                        "Database row not found: {}", e.message
                    ),
                    DatabaseErrorKind::ConstraintViolation => tracing::warn!(
                        operation = %e.operation,
                        context = ?e.context,
                        "Database constraint violation: {}", e.message
                    ),
                    _ => tracing::error!(
                        operation = %e.operation,
                        kind = %e.kind,
                        context = ?e.context,
                        retriable = e.is_retriable(),
                        "Database error: {}", e.message
                    ),
                }

                match e.kind {
                    DatabaseErrorKind::NotFound => (
                        StatusCode::NOT_FOUND,
                        "Not found",
                        "The requested record does not exist.".to_string(),
                    ),
                    DatabaseErrorKind::ConstraintViolation => (
                        StatusCode::CONFLICT,
                        "Conflict",
                        "The operation conflicts with existing data. Records that are still referenced by other records cannot be removed.".to_string(),
                    ),
                    _ => internal(),
                }
            }
            Error::Io(e) => {
                tracing::error!("I/O error: {}", e);
                internal()
            }
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, "Access denied", msg.clone()),
            Error::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "Not found", msg.clone())
            }
            Error::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "Conflict", msg.clone())
            }
            Error::ValidationError(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid input",
                msg.clone(),
            ),
            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal()
            }
            Error::Session(msg) => {
                tracing::error!("Session error: {}", msg);
                internal()
            }
            Error::Auth(msg) => {
                tracing::error!("Auth error: {}", msg);
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error",
        "An error occurred while processing your request.".to_string(),
    )
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, title, message) = self.classify();

        HtmlTemplate::page(ErrorTemplate {
            ctx: TemplateContext::new(),
            status: status.as_u16(),
            title: title.to_string(),
            message,
        })
        .with_status(status)
        .into_response()
    }
}

// Manual From implementations for boxed errors
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<tower_sessions::session::Error> for Error {
    fn from(err: tower_sessions::session::Error) -> Self {
        Error::Session(err.to_string())
    }
}

// Conversion from sqlx::Error to DatabaseError
impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::Error as E;

        match err {
            E::RowNotFound => Self::not_found(DatabaseOperation::Query, "Row not found"),
            E::PoolTimedOut => Self::pool_exhausted("Connection pool timed out"),
            E::PoolClosed => Self::connection_failed("Connection pool is closed"),
            E::Protocol(msg) => Self::new(
                DatabaseOperation::Query,
                DatabaseErrorKind::QueryFailed,
                msg,
            ),
            E::Configuration(e) => Self::new(
                DatabaseOperation::Connect,
                DatabaseErrorKind::Configuration,
                e.to_string(),
            ),
            E::Io(e) => Self::new(
                DatabaseOperation::Connect,
                DatabaseErrorKind::ConnectionFailed,
                e.to_string(),
            ),
            E::ColumnNotFound(col) => Self::new(
                DatabaseOperation::Query,
                DatabaseErrorKind::QueryFailed,
                format!("Column not found: {}", col),
            ),
            E::ColumnDecode { index, source } => Self::new(
                DatabaseOperation::Query,
                DatabaseErrorKind::TypeConversion,
                format!("Failed to decode column {}: {}", index, source),
            ),
            E::Decode(e) => Self::new(
                DatabaseOperation::Query,
                DatabaseErrorKind::TypeConversion,
                e.to_string(),
            ),
            E::Migrate(e) => Self::new(
                DatabaseOperation::Migration,
                DatabaseErrorKind::QueryFailed,
                e.to_string(),
            ),
            E::Database(db_err) => {
                let kind = if db_err.is_unique_violation()
                    || db_err.is_foreign_key_violation()
                    || db_err.is_check_violation()
                {
                    DatabaseErrorKind::ConstraintViolation
                } else {
                    DatabaseErrorKind::QueryFailed
                };
                Self::new(DatabaseOperation::Query, kind, db_err.to_string())
            }
            E::WorkerCrashed => Self::connection_failed("Database worker crashed"),
            _ => Self::new(
                DatabaseOperation::Query,
                DatabaseErrorKind::Other,
                err.to_string(),
            ),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Database(DatabaseError::from(err))
    }
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Error::Database(DatabaseError::new(
            DatabaseOperation::Migration,
            DatabaseErrorKind::QueryFailed,
            err.to_string(),
        ))
    }
}

impl From<DatabaseError> for Error {
    fn from(err: DatabaseError) -> Self {
        Error::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_database_error_display() {
        let err = DatabaseError::not_found(DatabaseOperation::Query, "car 5")
            .add_context("cars");
        let text = err.to_string();
        assert!(text.contains("not_found"));
        assert!(text.contains("query"));
        assert!(text.contains("[context: cars]"));
    }

    #[test]
    fn test_retriable_kinds() {
        assert!(DatabaseError::pool_exhausted("busy").is_retriable());
        assert!(DatabaseError::connection_failed("down").is_retriable());
        assert!(!DatabaseError::constraint_violation(DatabaseOperation::Insert, "fk")
            .is_retriable());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
        assert!(!err.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_not_found_renders_html_page() {
        let response = Error::NotFound("Car 42".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/html"));
        let body = body_text(response).await;
        assert!(body.contains("Car 42"));
    }

    #[tokio::test]
    async fn test_constraint_violation_is_conflict_without_details() {
        let err = Error::Database(DatabaseError::constraint_violation(
            DatabaseOperation::Delete,
            "FOREIGN KEY constraint failed",
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_text(response).await;
        assert!(!body.contains("FOREIGN KEY"));
    }

    #[tokio::test]
    async fn test_internal_error_hides_message() {
        let response = Error::Internal("secret connection string".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(!body.contains("secret"));
    }

    #[test]
    fn test_forbidden_status() {
        let response = Error::Forbidden("Admins only".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_status_for_each_variant() {
        let cases = [
            (Error::NotFound("Car 1".into()), StatusCode::NOT_FOUND),
            (Error::Conflict("Car 1".into()), StatusCode::CONFLICT),
            (Error::ValidationError("Year".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (Error::Session("store".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Auth("hash".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                Error::Io(std::io::Error::other("disk")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.classify().0, status, "{err}");
        }
    }
}
