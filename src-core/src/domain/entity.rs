//! Domain Layer - Core Entity Trait
//!
//! Every record the application mirrors from the remote service carries an
//! id and belongs to exactly one owner.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a remote record (uuid text as issued by the service)
pub type RecordId = String;

/// Core trait for all owned records
pub trait Entity: Sized + Clone {
    /// Returns the record's unique identifier
    fn id(&self) -> &str;

    /// Returns the id of the identity that owns the record
    fn owner_id(&self) -> &str;
}

/// Find a record by id in a hydrated collection
pub fn find_by_id<'a, T: Entity>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|record| record.id() == id)
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum DomainError {
    /// A required form field was left blank
    #[error("{0} is required")]
    Required(String),
}
