//! HTTP adapters for the recipes service.
//!
//! # Responsibility
//! - Translate HTTP requests into `RecipeService` calls and back.
//! - Offer interchangeable routing front-ends over one set of handlers.
//!
//! # Invariants
//! - Handlers never touch a store directly; every call goes through the service.
//! - Both routing variants produce identical responses for matching requests.

use recipes_core::{RecipeService, RecipeStore};
use std::sync::Arc;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod routes;

pub use config::{Backend, ConfigError, DuplicateMode, RouterKind, ServerConfig};
pub use error::ApiError;
pub use routes::create_router;

/// Store handle shared by every request task.
pub type SharedStore = Arc<dyn RecipeStore>;

/// Axum state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: RecipeService<SharedStore>,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        Self {
            service: RecipeService::new(store),
        }
    }
}
