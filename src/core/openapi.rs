use utoipa::{Modify, OpenApi};

use crate::features::alerts::{dtos as alerts_dtos, handlers as alerts_handlers};
use crate::features::automations::{
    dtos as automations_dtos, handlers as automations_handlers, models as automations_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::employees::{dtos as employees_dtos, handlers as employees_handlers};
use crate::features::health::handlers as health_handlers;
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::shared::types::{ErrorResponse, MessageResponse, SuccessResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::list_reports,
        reports_handlers::submit_report,
        // Dashboard
        dashboard_handlers::get_dashboard,
        // Automations
        automations_handlers::list_automations,
        automations_handlers::create_automation,
        automations_handlers::delete_automation,
        // Employees
        employees_handlers::update_location,
        // Alerts
        alerts_handlers::create_alert,
        alerts_handlers::list_public_alerts,
        // Health
        health_handlers::health_check,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            SuccessResponse,
            // Reports
            reports_dtos::ReportSummaryDto,
            reports_dtos::CreateReportDto,
            reports_dtos::SentimentAnalysisDto,
            reports_dtos::ReportSubmissionResponseDto,
            // Dashboard
            dashboard_dtos::ChartSeriesDto,
            dashboard_dtos::DashboardDto,
            // Automations
            automations_models::AutomationTask,
            automations_dtos::CreateAutomationDto,
            automations_dtos::CreateAutomationResponseDto,
            // Employees
            employees_dtos::UpdateLocationDto,
            // Alerts
            alerts_dtos::CreateAlertDto,
            alerts_dtos::PublicAlertDto,
            // Health
            health_handlers::HealthResponse,
        )
    ),
    tags(
        (name = "reports", description = "Rider report listing and submission"),
        (name = "dashboard", description = "Aggregated report statistics"),
        (name = "automations", description = "Scheduled report deliveries"),
        (name = "employees", description = "Field staff location tracking"),
        (name = "alerts", description = "Operational alerts"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/api/reporte",
            "/reportes",
            "/api/dashboard",
            "/api/automatizacion",
            "/api/automatizacion/{id}",
            "/api/employee/update-location",
            "/api/admin/create-alert",
            "/api/public/alerts",
            "/health",
        ] {
            assert!(paths.contains(&path), "missing {}", path);
        }
    }

    #[test]
    fn test_modifier_overrides_info() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Metro Reportes".to_string(),
            version: "9.9.9".to_string(),
            description: "test".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Metro Reportes");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
