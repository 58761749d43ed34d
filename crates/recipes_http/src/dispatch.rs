//! Regex-based request dispatch.
//!
//! Matches method and path by hand instead of relying on router path
//! templates. Mounted as the fallback of an otherwise empty router.
//!
//! # Invariants
//! - Identifier paths only match slug-shaped ids.
//! - Unmatched requests yield `404` without reaching the service.

use crate::error::ApiError;
use crate::handlers::{
    add_recipe, get_recipe, list_recipes, remove_recipe, run_blocking, update_recipe, ApiResult,
};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, Uri};
use log::debug;
use once_cell::sync::Lazy;
use recipes_core::Recipe;
use regex::Regex;

static RECIPES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/recipes/*$").expect("valid recipes path regex"));
static RECIPE_WITH_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/recipes/([a-z0-9]+(?:-[a-z0-9]+)*)$").expect("valid recipe id path regex")
});

/// Recipe operation selected by method and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeRoute {
    List,
    Add,
    Get(String),
    Update(String),
    Remove(String),
}

impl RecipeRoute {
    /// Resolves a request line into a route, or `None` when nothing matches.
    pub fn resolve(method: &Method, path: &str) -> Option<Self> {
        if RECIPES_RE.is_match(path) {
            return match *method {
                Method::GET => Some(Self::List),
                Method::POST => Some(Self::Add),
                _ => None,
            };
        }

        let id = RECIPE_WITH_ID_RE.captures(path)?.get(1)?.as_str().to_string();
        match *method {
            Method::GET => Some(Self::Get(id)),
            Method::PUT => Some(Self::Update(id)),
            Method::DELETE => Some(Self::Remove(id)),
            _ => None,
        }
    }
}

/// Fallback handler that routes every non-home request.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> ApiResult {
    let path = uri.path();
    let Some(route) = RecipeRoute::resolve(&method, path) else {
        return Err(ApiError::RouteNotFound(format!("{method} {path}")));
    };
    debug!("event=http_dispatch module=http status=matched method={method} path={path}");

    run_blocking(state, move |state| match route {
        RecipeRoute::List => list_recipes(state),
        RecipeRoute::Add => add_recipe(state, decode_recipe(&body)?),
        RecipeRoute::Get(id) => get_recipe(state, &id),
        RecipeRoute::Update(id) => update_recipe(state, &id, decode_recipe(&body)?),
        RecipeRoute::Remove(id) => remove_recipe(state, &id),
    })
    .await
}

fn decode_recipe(body: &[u8]) -> Result<Recipe, ApiError> {
    Ok(serde_json::from_slice(body)?)
}
