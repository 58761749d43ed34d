//! Router construction for both routing variants.

use crate::config::RouterKind;
use crate::dispatch::dispatch;
use crate::handlers;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Builds the application router for the selected routing variant.
///
/// `Framework` covers path-template routers; `Regex` covers hand-matched
/// dispatch over a bare mux.
pub fn create_router(kind: RouterKind, state: AppState) -> Router {
    match kind {
        RouterKind::Framework => framework_router(state),
        RouterKind::Regex => regex_router(state),
    }
}

fn framework_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/recipes", get(handlers::list).post(handlers::add))
        .route("/recipes/", post(handlers::add))
        .route(
            "/recipes/:id",
            get(handlers::get)
                .put(handlers::update)
                .delete(handlers::remove),
        )
        .with_state(state)
}

fn regex_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .fallback(dispatch)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::create_router;
    use crate::config::RouterKind;
    use crate::AppState;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use recipes_core::{DuplicatePolicy, MemStore, SqliteRecipeStore};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const VARIANTS: [RouterKind; 2] = [RouterKind::Framework, RouterKind::Regex];

    fn memory_app(kind: RouterKind) -> Router {
        create_router(kind, AppState::new(Arc::new(MemStore::new())))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn home_page_responds() {
        for kind in VARIANTS {
            let response = memory_app(kind)
                .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&bytes[..], b"This is my home page");
        }
    }

    #[tokio::test]
    async fn carbonara_lifecycle() {
        for kind in VARIANTS {
            let app = memory_app(kind);

            let (status, body) = send(
                &app,
                Method::POST,
                "/recipes",
                Some(json!({"name": "Pasta Carbonara", "description": "Classic Roman dish"})),
            )
            .await;
            assert_eq!(status, StatusCode::OK, "{kind:?}");
            assert_eq!(body, json!({"status": "success", "id": "pasta-carbonara"}));

            let (status, body) = send(&app, Method::GET, "/recipes/pasta-carbonara", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!({"name": "Pasta Carbonara", "description": "Classic Roman dish"})
            );

            let (status, _) = send(
                &app,
                Method::PUT,
                "/recipes/pasta-carbonara",
                Some(json!({"name": "Pasta Carbonara", "description": "Updated"})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            let (_, body) = send(&app, Method::GET, "/recipes/pasta-carbonara", None).await;
            assert_eq!(body["description"], "Updated");

            let (status, body) = send(&app, Method::DELETE, "/recipes/pasta-carbonara", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"status": "success"}));

            let (status, body) = send(&app, Method::GET, "/recipes/pasta-carbonara", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{kind:?}");
            assert_eq!(body["error"], "not_found");
        }
    }

    #[tokio::test]
    async fn list_returns_object_keyed_by_id() {
        for kind in VARIANTS {
            let app = memory_app(kind);
            for name in ["Waffles", "Apple Pie"] {
                send(&app, Method::POST, "/recipes/", Some(json!({"name": name}))).await;
            }

            let (status, body) = send(&app, Method::GET, "/recipes", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!({
                    "apple-pie": {"name": "Apple Pie", "description": ""},
                    "waffles": {"name": "Waffles", "description": ""},
                })
            );
        }
    }

    #[tokio::test]
    async fn missing_recipes_are_not_found_for_every_verb() {
        for kind in VARIANTS {
            let app = memory_app(kind);
            let update = Some(json!({"name": "Ghost Dish"}));

            let (status, _) = send(&app, Method::GET, "/recipes/ghost-dish", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            let (status, _) = send(&app, Method::PUT, "/recipes/ghost-dish", update).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            let (status, _) = send(&app, Method::DELETE, "/recipes/ghost-dish", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn malformed_and_invalid_bodies_are_bad_requests() {
        for kind in VARIANTS {
            let app = memory_app(kind);

            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(Method::POST)
                        .uri("/recipes")
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from("{not json"))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{kind:?}");

            let (status, body) =
                send(&app, Method::POST, "/recipes", Some(json!({"name": "  "}))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "invalid_recipe");
        }
    }

    #[tokio::test]
    async fn duplicate_names_conflict_under_reject_policy() {
        for kind in VARIANTS {
            let store = SqliteRecipeStore::open_in_memory(DuplicatePolicy::Reject).unwrap();
            let app = create_router(kind, AppState::new(Arc::new(store)));
            let recipe = Some(json!({"name": "Fish & Chips"}));

            let (status, _) = send(&app, Method::POST, "/recipes", recipe.clone()).await;
            assert_eq!(status, StatusCode::OK);
            let (status, body) = send(&app, Method::POST, "/recipes", recipe).await;
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(body["error"], "already_exists");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_posts_on_sqlite_all_land() {
        for kind in VARIANTS {
            let store = SqliteRecipeStore::open_in_memory(DuplicatePolicy::Overwrite).unwrap();
            let app = create_router(kind, AppState::new(Arc::new(store)));

            let mut tasks = tokio::task::JoinSet::new();
            for n in 0..32 {
                let app = app.clone();
                tasks.spawn(async move {
                    let recipe = Some(json!({"name": format!("Dish {n}")}));
                    send(&app, Method::POST, "/recipes", recipe).await.0
                });
            }
            while let Some(status) = tasks.join_next().await {
                assert_eq!(status.unwrap(), StatusCode::OK, "{kind:?}");
            }

            let (status, body) = send(&app, Method::GET, "/recipes", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body.as_object().unwrap().len(), 32);
        }
    }

    #[tokio::test]
    async fn regex_router_rejects_unknown_routes() {
        let app = memory_app(RouterKind::Regex);

        let (status, body) = send(&app, Method::GET, "/recipes/Not_A_Slug", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");

        let (status, _) = send(&app, Method::PATCH, "/recipes", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
