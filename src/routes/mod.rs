//! API Routes
//!
//! - `POST /analyze` - Upload a document and receive its financial analysis

pub mod analyze;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let max_upload_bytes = state.config.server.max_upload_bytes;

    let router = Router::new()
        .merge(analyze::router(state))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    apply_cors(router)
}
