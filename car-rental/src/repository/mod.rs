//! Repository abstractions shared by the entity stores
//!
//! - [`Repository`]: create, read, update, delete for one table
//! - [`FilterCondition`]: a bound WHERE predicate
//! - [`Pagination`]: offset/limit window
//! - [`RepositoryError`]: structured store failures

mod error;
mod pagination;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use pagination::{FilterCondition, FilterOperator, FilterValue, OrderDirection, Pagination};
pub use traits::{Repository, RepositoryResult};
