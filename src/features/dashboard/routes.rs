use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::reports::services::ReportQueryService;

/// Create public dashboard routes
pub fn routes(query_service: Arc<ReportQueryService>) -> Router {
    Router::new()
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(query_service)
}
