//! Route modules for FormatForge Server

pub mod compress;
pub mod convert;
pub mod docx;
pub mod health;
pub mod history;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Value of `status` in every successful response body
pub const SUCCESS: &str = "success";

/// Build the full application router
pub fn app(state: AppState) -> Router {
    // Any origin, method and header
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config().server.max_body_bytes;

    Router::new()
        .merge(health::router())
        .merge(convert::router())
        .merge(compress::router())
        .merge(docx::router())
        .merge(history::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
