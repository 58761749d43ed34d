//! Core domain logic for the recipes service.
//! Every HTTP adapter reaches recipe data only through this crate.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod slug;
pub mod store;

pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget};
pub use model::recipe::{Recipe, RecipeId, RecipeValidationError};
pub use service::recipe_service::{RecipeService, RecipeServiceError, ServiceResult};
pub use crate::slug::{is_valid_id, slugify};
pub use store::memory::MemStore;
pub use store::sqlite::SqliteRecipeStore;
pub use store::{DuplicatePolicy, RecipeStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
