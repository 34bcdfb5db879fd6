use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::alerts::handlers;
use crate::features::alerts::services::AlertService;

/// Admin alert creation and the public alert feed
pub fn routes(alert_service: Arc<AlertService>) -> Router {
    Router::new()
        .route("/api/admin/create-alert", post(handlers::create_alert))
        .route("/api/public/alerts", get(handlers::list_public_alerts))
        .with_state(alert_service)
}
