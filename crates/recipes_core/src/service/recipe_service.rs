//! Recipe use-case service.
//!
//! # Responsibility
//! - Derive recipe identifiers from names before calling the store.
//! - Validate recipes on every write path.
//! - Translate store outcomes into use-case errors.
//!
//! # Invariants
//! - The service never bypasses store atomicity; each call is one store op.
//! - The service is storage-agnostic.

use crate::model::recipe::{Recipe, RecipeId, RecipeValidationError};
use crate::store::{RecipeStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, RecipeServiceError>;

/// Service error for recipe use-cases.
#[derive(Debug)]
pub enum RecipeServiceError {
    /// Write payload failed validation.
    InvalidRecipe(RecipeValidationError),
    /// Target recipe does not exist.
    RecipeNotFound(RecipeId),
    /// Store rejected a duplicate id.
    DuplicateRecipe(RecipeId),
    /// Internal store failure.
    Store(StoreError),
}

impl Display for RecipeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRecipe(err) => write!(f, "{err}"),
            Self::RecipeNotFound(id) => write!(f, "recipe not found: {id}"),
            Self::DuplicateRecipe(id) => write!(f, "recipe already exists: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RecipeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRecipe(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for RecipeServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::RecipeNotFound(id),
            StoreError::AlreadyExists(id) => Self::DuplicateRecipe(id),
            other => Self::Store(other),
        }
    }
}

impl From<RecipeValidationError> for RecipeServiceError {
    fn from(value: RecipeValidationError) -> Self {
        Self::InvalidRecipe(value)
    }
}

/// Recipe service facade over store implementations.
#[derive(Debug, Clone)]
pub struct RecipeService<S: RecipeStore> {
    store: S,
}

impl<S: RecipeStore> RecipeService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a recipe under the identifier derived from its name.
    ///
    /// # Contract
    /// - Returns the derived identifier.
    /// - An existing recipe with the same identifier is replaced unless the
    ///   store rejects duplicates, in which case `DuplicateRecipe` is returned.
    pub fn create(&self, recipe: &Recipe) -> ServiceResult<RecipeId> {
        recipe.validate()?;
        let id = recipe.derive_id();
        match self.store.add(&id, recipe) {
            Ok(()) => {
                info!("event=recipe_create module=service status=ok id={id}");
                Ok(id)
            }
            Err(err) => {
                warn!("event=recipe_create module=service status=error id={id} error={err}");
                Err(err.into())
            }
        }
    }

    pub fn get(&self, id: &str) -> ServiceResult<Recipe> {
        Ok(self.store.get(id)?)
    }

    /// Lists all recipes ordered by identifier.
    pub fn list(&self) -> ServiceResult<Vec<(RecipeId, Recipe)>> {
        let mut entries: Vec<_> = self.store.list()?.into_iter().collect();
        entries.sort_by(|(left, _), (right, _)| left.cmp(right));
        Ok(entries)
    }

    /// Replaces the recipe stored at `id`.
    ///
    /// The identifier is kept even when `recipe.name` changes.
    pub fn update(&self, id: &str, recipe: &Recipe) -> ServiceResult<()> {
        recipe.validate()?;
        self.store.update(id, recipe)?;
        info!("event=recipe_update module=service status=ok id={id}");
        Ok(())
    }

    pub fn remove(&self, id: &str) -> ServiceResult<()> {
        self.store.remove(id)?;
        info!("event=recipe_remove module=service status=ok id={id}");
        Ok(())
    }
}
