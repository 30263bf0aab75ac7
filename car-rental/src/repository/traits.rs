//! Repository trait for entity CRUD
//!
//! Uses return-position `impl Future` in traits, so no `async_trait` is needed.

use std::future::Future;

use super::error::RepositoryError;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// CRUD operations on a single entity table
///
/// # Type Parameters
///
/// - `Id`: identifier type
/// - `Entity`: the stored record
/// - `Input`: validated field values written on create and edit
///
/// Edit is a full replace of the mutable fields, never a partial patch.
pub trait Repository<Id, Entity, Input>: Send + Sync {
    /// Find an entity by its identifier
    fn find_by_id(&self, id: Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Check whether an entity exists
    fn exists(&self, id: Id) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// Insert a new entity and return its identifier
    fn create(&self, data: Input) -> impl Future<Output = RepositoryResult<Id>> + Send;

    /// Overwrite all mutable fields
    ///
    /// Returns `false` when no row was written.
    fn update(&self, id: Id, data: Input) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// Delete an entity
    ///
    /// Returns `true` if a row was deleted, `false` if it did not exist.
    fn delete(&self, id: Id) -> impl Future<Output = RepositoryResult<bool>> + Send;
}
