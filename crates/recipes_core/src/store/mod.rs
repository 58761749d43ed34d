//! Recipe store contract and implementations.
//!
//! # Responsibility
//! - Define the five-operation store contract used by every adapter.
//! - Provide the in-memory store and the SQLite-backed store.
//!
//! # Invariants
//! - Every operation is atomic with respect to the whole id -> recipe mapping.
//! - `get`/`update`/`remove` on a missing id return `StoreError::NotFound`.
//! - `update` never creates a record.
//! - Stores never derive identifiers; ids arrive already slugified.
//!
//! # See also
//! - `service::recipe_service` for id derivation and validation.

use crate::db::DbError;
use crate::model::recipe::{Recipe, RecipeId};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub mod memory;
pub mod sqlite;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error type shared by every store implementation.
///
/// `NotFound` and `AlreadyExists` are domain outcomes. The remaining variants
/// are internal faults.
#[derive(Debug)]
pub enum StoreError {
    NotFound(RecipeId),
    AlreadyExists(RecipeId),
    Db(DbError),
    /// A persisted column does not hold text.
    InvalidData(String),
    LockPoisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "recipe not found: {id}"),
            Self::AlreadyExists(id) => write!(f, "recipe already exists: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted recipe data: {message}"),
            Self::LockPoisoned => write!(f, "recipe store lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Behavior of `add` when the id is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Replace the existing record silently.
    #[default]
    Overwrite,
    /// Fail with `StoreError::AlreadyExists` and keep the existing record.
    Reject,
}

/// Store contract for recipe CRUD.
///
/// Implementations must be safe to call from many threads at once.
pub trait RecipeStore: Send + Sync {
    fn add(&self, id: &str, recipe: &Recipe) -> StoreResult<()>;
    fn get(&self, id: &str) -> StoreResult<Recipe>;
    /// Returns a snapshot of every stored recipe. Iteration order is unspecified.
    fn list(&self) -> StoreResult<HashMap<RecipeId, Recipe>>;
    fn update(&self, id: &str, recipe: &Recipe) -> StoreResult<()>;
    fn remove(&self, id: &str) -> StoreResult<()>;
}

impl<S: RecipeStore + ?Sized> RecipeStore for Arc<S> {
    fn add(&self, id: &str, recipe: &Recipe) -> StoreResult<()> {
        (**self).add(id, recipe)
    }

    fn get(&self, id: &str) -> StoreResult<Recipe> {
        (**self).get(id)
    }

    fn list(&self) -> StoreResult<HashMap<RecipeId, Recipe>> {
        (**self).list()
    }

    fn update(&self, id: &str, recipe: &Recipe) -> StoreResult<()> {
        (**self).update(id, recipe)
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        (**self).remove(id)
    }
}
