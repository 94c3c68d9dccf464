use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use super::dto::{NewTodo, UpdateTodo};
use super::model::Todo;
use crate::error::ApiError;
use crate::state::AppState;

// HANDLERS

pub async fn list_all(State(state): State<AppState>) -> impl IntoResponse {
    wrap(state.store.list_all())
}

pub async fn list_completed(State(state): State<AppState>) -> impl IntoResponse {
    wrap(state.store.list_completed())
}

pub async fn list_active(State(state): State<AppState>) -> impl IntoResponse {
    wrap(state.store.list_active())
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let new = NewTodo::parse(body)?;
    let todo = state.store.create(new);
    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = UpdateTodo::parse(body)?;
    let todo = state.store.update(id, changes)?;
    tracing::info!(id = todo.id, "todo updated");
    Ok(Json(todo))
}

/// List responses wrap the records under a `todo` key.
fn wrap(todos: Vec<Todo>) -> Json<Value> {
    Json(serde_json::json!({ "todo": todos }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::routes;
    use crate::state::AppState;
    use crate::store::TodoStore;

    fn app() -> (Router, TodoStore) {
        let store = TodoStore::new();
        let router = routes::routes().with_state(AppState {
            store: store.clone(),
        });
        (router, store)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_then_list_partitions() {
        let (app, _) = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/todo",
                json!({ "task": "buy milk", "completed": false }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created, json!({ "id": 1, "task": "buy milk", "completed": false }));

        let response = app.clone().oneshot(get("/api/todo/active")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let active = body_json(response).await;
        assert_eq!(active["todo"].as_array().unwrap().len(), 1);
        assert_eq!(active["todo"][0]["id"], json!(1));

        let response = app.oneshot(get("/api/todo/completed")).await.unwrap();
        let completed = body_json(response).await;
        assert_eq!(completed["todo"], json!([]));
    }

    #[tokio::test]
    async fn create_passes_extra_fields_through() {
        let (app, _) = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/todo",
                json!({ "task": "buy milk", "completed": false, "priority": "high" }),
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        assert_eq!(created["priority"], json!("high"));

        let response = app.oneshot(get("/api/todo")).await.unwrap();
        let all = body_json(response).await;
        assert_eq!(all["todo"][0]["priority"], json!("high"));
    }

    #[tokio::test]
    async fn create_with_non_boolean_completed_is_400_and_no_mutation() {
        let (app, store) = app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/todo",
                json!({ "task": "buy milk", "completed": "yes" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
        assert!(store.list_all().is_empty());
    }

    #[tokio::test]
    async fn create_with_missing_task_is_400() {
        let (app, store) = app();

        let response = app
            .oneshot(json_request("POST", "/api/todo", json!({ "completed": true })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.list_all().is_empty());
    }

    #[tokio::test]
    async fn patch_merges_into_existing_record() {
        let (app, _) = app();

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/todo",
                json!({ "task": "buy milk", "completed": false }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                "/api/todo/1",
                json!({ "completed": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated, json!({ "id": 1, "task": "buy milk", "completed": true }));

        let response = app.oneshot(get("/api/todo/completed")).await.unwrap();
        let completed = body_json(response).await;
        assert_eq!(completed["todo"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn patch_unknown_id_is_404_and_no_mutation() {
        let (app, store) = app();

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/api/todo/99",
                json!({ "completed": true }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(store.list_all().is_empty());
    }

    #[tokio::test]
    async fn root_returns_liveness_string() {
        let (app, _) = app();

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(!bytes.is_empty());
    }
}
