use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::alerts::dtos::{CreateAlertDto, PublicAlertDto};
use crate::features::alerts::models::NewAlert;
use crate::features::alerts::services::AlertService;
use crate::shared::types::SuccessResponse;

/// Publish an operational alert
#[utoipa::path(
    post,
    path = "/api/admin/create-alert",
    request_body = CreateAlertDto,
    responses(
        (status = 200, description = "Alert created", body = SuccessResponse),
        (status = 400, description = "Validation error", body = crate::shared::types::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::shared::types::ErrorResponse)
    ),
    tag = "alerts"
)]
pub async fn create_alert(
    State(service): State<Arc<AlertService>>,
    AppJson(dto): AppJson<CreateAlertDto>,
) -> Result<Json<SuccessResponse>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let alert: NewAlert = dto.into();
    service.create(&alert).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Latest 20 public alerts, newest first
#[utoipa::path(
    get,
    path = "/api/public/alerts",
    responses(
        (status = 200, description = "Public alerts", body = Vec<PublicAlertDto>),
        (status = 500, description = "Storage failure", body = crate::shared::types::ErrorResponse)
    ),
    tag = "alerts"
)]
pub async fn list_public_alerts(
    State(service): State<Arc<AlertService>>,
) -> Result<Json<Vec<PublicAlertDto>>> {
    let alerts = service.list_public().await?;
    Ok(Json(alerts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::alerts::routes;
    use crate::shared::test_helpers::{database_pool, unreachable_pool};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn offline_server() -> TestServer {
        TestServer::new(routes::routes(Arc::new(AlertService::new(unreachable_pool())))).unwrap()
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let response = offline_server()
            .post("/api/admin/create-alert")
            .json(&json!({ "title": "", "message": "Retrasos en Línea B" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_public_alerts_surface_storage_failure() {
        let response = offline_server().get("/api/public/alerts").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_only_public_alerts_are_listed() {
        let pool = database_pool().await;
        let server = TestServer::new(routes::routes(Arc::new(AlertService::new(pool)))).unwrap();

        server
            .post("/api/admin/create-alert")
            .json(&json!({
                "title": "Aviso público de prueba",
                "message": "Servicio normalizado",
                "send_to_public": true
            }))
            .await
            .assert_status_ok();
        server
            .post("/api/admin/create-alert")
            .json(&json!({
                "title": "Aviso interno de prueba",
                "message": "Solo gerentes",
                "send_to_manager": true
            }))
            .await
            .assert_status_ok();

        let alerts: Vec<PublicAlertDto> = server.get("/api/public/alerts").await.json();

        assert!(alerts.len() <= 20);
        assert!(alerts
            .iter()
            .any(|a| a.title.as_deref() == Some("Aviso público de prueba")));
        assert!(alerts
            .iter()
            .all(|a| a.title.as_deref() != Some("Aviso interno de prueba")));
    }
}
