use axum::{http::Method, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod flights;
pub mod profiles;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The booking front ends are served from other origins.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/", get(|| async { "Server is running..." }))
        .merge(flights::routes())
        .merge(profiles::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
