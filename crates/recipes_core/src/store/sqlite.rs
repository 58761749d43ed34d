//! SQLite-backed recipe store.
//!
//! # Responsibility
//! - Provide the same CRUD contract as `MemStore` over the `recipes` table.
//! - Keep SQL details inside the store boundary.
//!
//! # Invariants
//! - Every operation runs under one connection mutex, so statements from
//!   concurrent callers never interleave.
//! - Records are stored and returned as given; only rows whose columns do not
//!   hold text are rejected on read.

use super::{DuplicatePolicy, RecipeStore, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use crate::model::recipe::{Recipe, RecipeId};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const RECIPE_SELECT_SQL: &str = "SELECT id, name, description FROM recipes";

/// Relational recipe store over a single SQLite connection.
pub struct SqliteRecipeStore {
    conn: Mutex<Connection>,
    on_duplicate: DuplicatePolicy,
}

impl SqliteRecipeStore {
    /// Wraps an already-migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self::with_policy(conn, DuplicatePolicy::default())
    }

    pub fn with_policy(conn: Connection, on_duplicate: DuplicatePolicy) -> Self {
        Self {
            conn: Mutex::new(conn),
            on_duplicate,
        }
    }

    /// Opens (or creates) a database file and applies migrations.
    pub fn open(path: impl AsRef<Path>, on_duplicate: DuplicatePolicy) -> StoreResult<Self> {
        Ok(Self::with_policy(open_db(path)?, on_duplicate))
    }

    /// Opens a private in-memory database and applies migrations.
    pub fn open_in_memory(on_duplicate: DuplicatePolicy) -> StoreResult<Self> {
        Ok(Self::with_policy(open_db_in_memory()?, on_duplicate))
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl RecipeStore for SqliteRecipeStore {
    fn add(&self, id: &str, recipe: &Recipe) -> StoreResult<()> {
        let conn = self.conn()?;
        let sql = match self.on_duplicate {
            DuplicatePolicy::Overwrite => {
                "INSERT INTO recipes (id, name, description) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    description = excluded.description,
                    updated_at = (strftime('%s', 'now') * 1000);"
            }
            DuplicatePolicy::Reject => {
                "INSERT INTO recipes (id, name, description) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO NOTHING;"
            }
        };

        let changed = conn.execute(
            sql,
            params![id, recipe.name.as_str(), recipe.description.as_str()],
        )?;
        if changed == 0 {
            return Err(StoreError::AlreadyExists(id.to_string()));
        }

        debug!("event=recipe_add module=store backend=sqlite status=ok id={id}");
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Recipe> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{RECIPE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            let (_, recipe) = parse_recipe_row(row)?;
            return Ok(recipe);
        }

        Err(StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> StoreResult<HashMap<RecipeId, Recipe>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{RECIPE_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut recipes = HashMap::new();

        while let Some(row) = rows.next()? {
            let (id, recipe) = parse_recipe_row(row)?;
            recipes.insert(id, recipe);
        }

        Ok(recipes)
    }

    fn update(&self, id: &str, recipe: &Recipe) -> StoreResult<()> {
        let changed = self.conn()?.execute(
            "UPDATE recipes
             SET
                name = ?1,
                description = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![recipe.name.as_str(), recipe.description.as_str(), id],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        debug!("event=recipe_update module=store backend=sqlite status=ok id={id}");
        Ok(())
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        let changed = self
            .conn()?
            .execute("DELETE FROM recipes WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        debug!("event=recipe_remove module=store backend=sqlite status=ok id={id}");
        Ok(())
    }
}

fn parse_recipe_row(row: &Row<'_>) -> StoreResult<(RecipeId, Recipe)> {
    let recipe = Recipe {
        name: column(row, "name")?,
        description: column(row, "description")?,
    };
    Ok((column(row, "id")?, recipe))
}

/// Reads a text column, reporting storage-class mismatches as `InvalidData`.
fn column(row: &Row<'_>, name: &str) -> StoreResult<String> {
    row.get(name).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(_, column, kind) => StoreError::InvalidData(format!(
            "column `recipes.{column}` holds {kind}, expected text"
        )),
        rusqlite::Error::FromSqlConversionFailure(_, kind, _) => StoreError::InvalidData(
            format!("column `recipes.{name}` holds unconvertible {kind}"),
        ),
        other => other.into(),
    })
}
