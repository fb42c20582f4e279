use std::sync::Arc;

use axum::{routing::get, Router};
use configs::AppMeta;
use service::store::UserStore;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use crate::observability;

pub mod meta;
pub mod users;

/// Shared handler state. The users store is injected here; nothing global.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn UserStore>,
    pub meta: Arc<AppMeta>,
    /// Whether a database URL is configured; drives `/api/health`.
    pub database_configured: bool,
    /// Mount `/api/debug/db`.
    pub debug_routes: bool,
}

/// Build the full application router: API routes, metrics and the static
/// front-end bundle as fallback for every other path.
pub fn build_router(state: ServerState, cors: CorsLayer, static_dir: &str) -> Router {
    let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
    let static_files = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    let mut api = Router::new()
        .route("/api/health", get(meta::health))
        .route("/api/info", get(meta::info))
        .route("/api/users", get(users::list_users).post(users::create_user));
    if state.debug_routes {
        api = api.route("/api/debug/db", get(users::debug_db));
    }

    api.route("/metrics", get(observability::metrics))
        .with_state(state)
        .fallback_service(static_files)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request at INFO, without headers
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
