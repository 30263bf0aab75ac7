//! Repository error types
//!
//! ```rust
//! use car_rental::repository::{RepositoryError, RepositoryErrorKind};
//!
//! let error = RepositoryError::not_found("Car", "42");
//! assert!(matches!(error.kind, RepositoryErrorKind::NotFound));
//! assert!(error.entity_id.is_some());
//! ```

use std::fmt;

use crate::error::{DatabaseError, DatabaseErrorKind, DatabaseOperation, Error};

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Finding a single entity by ID
    FindById,
    /// Listing entities
    FindAll,
    /// Counting entities
    Count,
    /// Checking if an entity exists
    Exists,
    /// Creating a new entity
    Create,
    /// Updating an existing entity
    Update,
    /// Deleting an entity
    Delete,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindById => write!(f, "find_by_id"),
            Self::FindAll => write!(f, "find_all"),
            Self::Count => write!(f, "count"),
            Self::Exists => write!(f, "exists"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Entity was not found
    NotFound,
    /// Entity already exists (duplicate key)
    AlreadyExists,
    /// Foreign-key or check constraint refused the write
    ConstraintViolation,
    /// The row changed underneath a write
    Conflict,
    /// Failed to connect to database
    ConnectionFailed,
    /// Underlying database error
    DatabaseError,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::Conflict => write!(f, "conflict"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::DatabaseError => write!(f, "database_error"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "Car", "Client")
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error with entity context
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            operation: RepositoryOperation::FindById,
            kind: RepositoryErrorKind::NotFound,
            message: "Entity not found".to_string(),
            entity_type: Some(entity_type.into()),
            entity_id: Some(entity_id.into()),
        }
    }

    /// Create a write-conflict error: the row exists but the write did not apply
    pub fn conflict(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            operation: RepositoryOperation::Update,
            kind: RepositoryErrorKind::Conflict,
            message: "The record was modified by another request".to_string(),
            entity_type: Some(entity_type.into()),
            entity_id: Some(entity_id.into()),
        }
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether the store refused the write because of a constraint.
    ///
    /// Covers unique keys as well as foreign keys; forms surface both as a
    /// form-level error.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConstraintViolation | RepositoryErrorKind::AlreadyExists
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;

        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }

        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::RowNotFound => RepositoryErrorKind::NotFound,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                RepositoryErrorKind::ConnectionFailed
            }
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryErrorKind::AlreadyExists
            }
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() || db_err.is_check_violation() =>
            {
                RepositoryErrorKind::ConstraintViolation
            }
            _ => RepositoryErrorKind::DatabaseError,
        };

        Self::new(RepositoryOperation::FindAll, kind, err.to_string())
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        let label = match (&err.entity_type, &err.entity_id) {
            (Some(entity_type), Some(entity_id)) => format!("{entity_type} {entity_id}"),
            (Some(entity_type), None) => entity_type.clone(),
            _ => "Record".to_string(),
        };

        match err.kind {
            RepositoryErrorKind::NotFound => Error::NotFound(format!("{label} was not found.")),
            RepositoryErrorKind::Conflict => {
                Error::Conflict(format!("{label} was changed by another request."))
            }
            RepositoryErrorKind::AlreadyExists | RepositoryErrorKind::ConstraintViolation => {
                let operation = match err.operation {
                    RepositoryOperation::Create => DatabaseOperation::Insert,
                    RepositoryOperation::Update => DatabaseOperation::Update,
                    RepositoryOperation::Delete => DatabaseOperation::Delete,
                    _ => DatabaseOperation::Query,
                };
                Error::Database(
                    DatabaseError::constraint_violation(operation, err.message).add_context(label),
                )
            }
            RepositoryErrorKind::ConnectionFailed => {
                Error::Database(DatabaseError::connection_failed(err.message))
            }
            RepositoryErrorKind::DatabaseError => Error::Database(
                DatabaseError::new(
                    DatabaseOperation::Query,
                    DatabaseErrorKind::QueryFailed,
                    err.message,
                )
                .add_context(format!("{} ({})", label, err.operation)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_operation_display() {
        assert_eq!(format!("{}", RepositoryOperation::FindById), "find_by_id");
        assert_eq!(format!("{}", RepositoryOperation::Create), "create");
        assert_eq!(format!("{}", RepositoryOperation::Delete), "delete");
    }

    #[test]
    fn test_not_found_convenience() {
        let error = RepositoryError::not_found("Car", "7");
        assert_eq!(error.operation, RepositoryOperation::FindById);
        assert_eq!(error.kind, RepositoryErrorKind::NotFound);
        assert_eq!(error.entity_type.as_deref(), Some("Car"));
        assert_eq!(error.entity_id.as_deref(), Some("7"));
        assert_eq!(
            error.to_string(),
            "Repository not_found error during find_by_id: Entity not found [Car: 7]"
        );
    }

    #[test]
    fn test_row_not_found_from_sqlx() {
        let error = RepositoryError::from(sqlx::Error::RowNotFound)
            .with_operation(RepositoryOperation::Update);
        assert_eq!(error.kind, RepositoryErrorKind::NotFound);
        assert_eq!(error.operation, RepositoryOperation::Update);
    }

    #[test]
    fn test_conversion_into_crate_error() {
        let not_found: Error = RepositoryError::not_found("Client", "3").into();
        assert!(not_found.is_not_found());

        let conflict: Error = RepositoryError::conflict("Car", "3").into();
        assert!(matches!(conflict, Error::Conflict(_)));

        let constraint: Error = RepositoryError::new(
            RepositoryOperation::Delete,
            RepositoryErrorKind::ConstraintViolation,
            "FOREIGN KEY constraint failed",
        )
        .with_entity("CarClass", "1")
        .into();
        assert!(constraint.is_constraint_violation());
    }

    #[test]
    fn test_constraint_kinds() {
        let duplicate = RepositoryError::new(
            RepositoryOperation::Create,
            RepositoryErrorKind::AlreadyExists,
            "UNIQUE constraint failed",
        );
        assert!(duplicate.is_constraint_violation());
        assert!(!RepositoryError::not_found("Car", "1").is_constraint_violation());
    }
}
