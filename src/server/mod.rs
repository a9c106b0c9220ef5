//! HTTP API for the bean store
//!
//! Five CRUD endpoints over the dry_beans table, plus a service-info index,
//! a status endpoint, and a health check. No server-side pagination or
//! filtering: `GET /beans` always returns the full table and the client
//! does the rest.

pub mod routes;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::BeanError;
use crate::store::BeanDb;

/// State shared across handlers
pub struct AppState {
    pub db: BeanDb,
}

pub type SharedState = Arc<AppState>;

/// Create the API router
pub fn create_router(state: SharedState) -> Router {
    // Open CORS: the browser frontend may be served from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/status", get(routes::status))
        .route("/health", get(routes::health))
        .route("/beans", get(routes::list_beans).post(routes::create_bean))
        .route(
            "/beans/:id",
            get(routes::get_bean)
                .put(routes::update_bean)
                .delete(routes::delete_bean),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for BeanError {
    fn into_response(self) -> Response {
        let status = match &self {
            BeanError::NotFound(_) => StatusCode::NOT_FOUND,
            BeanError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            BeanError::NotFound(_) => "Bean not found".to_string(),
            other => other.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
