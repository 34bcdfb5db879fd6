use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::features::automations::handlers;
use crate::features::automations::services::AutomationStore;

/// Create automation task routes
pub fn routes(store: Arc<AutomationStore>) -> Router {
    Router::new()
        .route(
            "/api/automatizacion",
            get(handlers::list_automations).post(handlers::create_automation),
        )
        .route(
            "/api/automatizacion/{id}",
            delete(handlers::delete_automation),
        )
        .with_state(store)
}
