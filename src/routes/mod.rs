use axum::{
    routing::{get, patch},
    Router,
};

mod health;
pub mod todos;

pub use health::health;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let todo_router = Router::new()
        .route(
            "/",
            get(todos::routes::list_all).post(todos::routes::create),
        )
        .route("/completed", get(todos::routes::list_completed))
        .route("/active", get(todos::routes::list_active))
        .route("/{id}", patch(todos::routes::update));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/todo", todo_router)
}

async fn root() -> &'static str {
    "Todo API is up and running"
}
