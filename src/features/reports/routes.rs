use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{ReportQueryService, ReportService};

/// Create routes for the reports feature
///
/// `/reportes` keeps the path the public form posts to
pub fn routes(query_service: Arc<ReportQueryService>, report_service: Arc<ReportService>) -> Router {
    let state = ReportState {
        query_service,
        report_service,
    };

    Router::new()
        .route("/api/reporte", get(handlers::list_reports))
        .route("/reportes", post(handlers::submit_report))
        .with_state(state)
}
