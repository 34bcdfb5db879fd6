use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::employees::handlers;
use crate::features::employees::services::EmployeeService;

pub fn routes(employee_service: Arc<EmployeeService>) -> Router {
    Router::new()
        .route(
            "/api/employee/update-location",
            post(handlers::update_location),
        )
        .with_state(employee_service)
}
