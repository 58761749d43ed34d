//! In-memory recipe store.
//!
//! # Invariants
//! - One `RwLock` guards the whole mapping; reads share, writes exclude.
//! - Contents live only as long as the store instance.

use super::{DuplicatePolicy, RecipeStore, StoreError, StoreResult};
use crate::model::recipe::{Recipe, RecipeId};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local recipe store.
#[derive(Debug, Default)]
pub struct MemStore {
    recipes: RwLock<HashMap<RecipeId, Recipe>>,
    on_duplicate: DuplicatePolicy,
}

impl MemStore {
    /// Creates an empty store that overwrites on duplicate ids.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with an explicit duplicate-id policy.
    pub fn with_policy(on_duplicate: DuplicatePolicy) -> Self {
        Self {
            recipes: RwLock::default(),
            on_duplicate,
        }
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.on_duplicate
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<RecipeId, Recipe>>> {
        self.recipes.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<RecipeId, Recipe>>> {
        self.recipes.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl RecipeStore for MemStore {
    fn add(&self, id: &str, recipe: &Recipe) -> StoreResult<()> {
        let mut recipes = self.write()?;
        match recipes.entry(id.to_string()) {
            Entry::Occupied(_) if self.on_duplicate == DuplicatePolicy::Reject => {
                return Err(StoreError::AlreadyExists(id.to_string()));
            }
            Entry::Occupied(mut slot) => {
                slot.insert(recipe.clone());
                debug!("event=recipe_add module=store backend=memory status=ok id={id} replaced=true");
            }
            Entry::Vacant(slot) => {
                slot.insert(recipe.clone());
                debug!("event=recipe_add module=store backend=memory status=ok id={id} replaced=false");
            }
        }
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Recipe> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> StoreResult<HashMap<RecipeId, Recipe>> {
        Ok(self.read()?.clone())
    }

    fn update(&self, id: &str, recipe: &Recipe) -> StoreResult<()> {
        let mut recipes = self.write()?;
        let slot = recipes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = recipe.clone();
        debug!("event=recipe_update module=store backend=memory status=ok id={id}");
        Ok(())
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        if self.write()?.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!("event=recipe_remove module=store backend=memory status=ok id={id}");
        Ok(())
    }
}
