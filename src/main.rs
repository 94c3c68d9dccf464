mod config;
mod error;
mod routes;
mod state;
mod store;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = config::Config::from_env();

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .map(|o| o.parse().expect("ALLOWED_ORIGINS must contain valid origins"))
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE]);

    let state = state::AppState {
        store: store::TodoStore::new(),
    };

    let app = routes::routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await.unwrap();

    tracing::info!("server is chilling at http://{}", config.addr());

    axum::serve(listener, app).await.unwrap();
}
