//! Recipe request handlers shared by both routing variants.
//!
//! The `*_recipe` functions hold the request logic. The async wrappers only
//! pull arguments out of the request for the framework router; the regex
//! dispatcher calls the `*_recipe` functions directly.
//!
//! # Invariants
//! - Store calls never run on an async worker thread. Both routers reach the
//!   `*_recipe` functions through [`run_blocking`], since the SQLite backend
//!   holds a mutex across disk I/O.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use recipes_core::Recipe;
use serde_json::json;
use std::collections::BTreeMap;

pub type ApiResult = Result<Response, ApiError>;

pub async fn home() -> &'static str {
    "This is my home page"
}

pub fn add_recipe(state: &AppState, recipe: Recipe) -> ApiResult {
    let id = state.service.create(&recipe)?;
    Ok((StatusCode::OK, Json(json!({ "status": "success", "id": id }))).into_response())
}

/// Responds with every recipe as an object keyed by id, in id order.
pub fn list_recipes(state: &AppState) -> ApiResult {
    let recipes: BTreeMap<_, _> = state.service.list()?.into_iter().collect();
    Ok((StatusCode::OK, Json(recipes)).into_response())
}

pub fn get_recipe(state: &AppState, id: &str) -> ApiResult {
    let recipe = state.service.get(id)?;
    Ok((StatusCode::OK, Json(recipe)).into_response())
}

pub fn update_recipe(state: &AppState, id: &str, recipe: Recipe) -> ApiResult {
    state.service.update(id, &recipe)?;
    Ok(success())
}

pub fn remove_recipe(state: &AppState, id: &str) -> ApiResult {
    state.service.remove(id)?;
    Ok(success())
}

fn success() -> Response {
    (StatusCode::OK, Json(json!({ "status": "success" }))).into_response()
}

/// Runs `op` on the blocking thread pool and waits for its response.
pub async fn run_blocking<F>(state: AppState, op: F) -> ApiResult
where
    F: FnOnce(&AppState) -> ApiResult + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&state)).await?
}

/// POST /recipes
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<Recipe>, JsonRejection>,
) -> ApiResult {
    let Json(recipe) = payload?;
    run_blocking(state, move |state| add_recipe(state, recipe)).await
}

/// GET /recipes
pub async fn list(State(state): State<AppState>) -> ApiResult {
    run_blocking(state, list_recipes).await
}

/// GET /recipes/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    run_blocking(state, move |state| get_recipe(state, &id)).await
}

/// PUT /recipes/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Recipe>, JsonRejection>,
) -> ApiResult {
    let Json(recipe) = payload?;
    run_blocking(state, move |state| update_recipe(state, &id, recipe)).await
}

/// DELETE /recipes/:id
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    run_blocking(state, move |state| remove_recipe(state, &id)).await
}
