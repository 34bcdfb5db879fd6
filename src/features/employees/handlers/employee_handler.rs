use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::employees::dtos::UpdateLocationDto;
use crate::features::employees::services::EmployeeService;
use crate::shared::types::SuccessResponse;

/// Update a field employee's live location
#[utoipa::path(
    post,
    path = "/api/employee/update-location",
    request_body = UpdateLocationDto,
    responses(
        (status = 200, description = "Location updated", body = SuccessResponse),
        (status = 400, description = "Validation error", body = crate::shared::types::ErrorResponse),
        (status = 404, description = "Unknown employee code", body = crate::shared::types::ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn update_location(
    State(service): State<Arc<EmployeeService>>,
    AppJson(dto): AppJson<UpdateLocationDto>,
) -> Result<Json<SuccessResponse>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.update_location(&dto).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::employees::routes;
    use crate::shared::test_helpers::{database_pool, unreachable_pool};
    use crate::shared::types::ErrorResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_rejects_out_of_range_latitude() {
        let app = routes::routes(Arc::new(EmployeeService::new(unreachable_pool())));
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/employee/update-location")
            .json(&json!({ "employee_code": "EMP-001", "latitude": 123.0, "longitude": -99.13 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = routes::routes(Arc::new(EmployeeService::new(unreachable_pool())));
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/employee/update-location")
            .json(&json!({ "latitude": 19.43 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_unknown_employee_is_not_found() {
        let app = routes::routes(Arc::new(EmployeeService::new(database_pool().await)));
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/employee/update-location")
            .json(&json!({ "employee_code": "NO-EXISTE", "latitude": 19.43, "longitude": -99.13 }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Empleado no encontrado");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_known_employee_is_updated() {
        let pool = database_pool().await;
        sqlx::query(
            "INSERT INTO employees (employee_code, full_name) VALUES ('EMP-TEST', 'Prueba') \
             ON CONFLICT (employee_code) DO NOTHING",
        )
        .execute(&pool)
        .await
        .unwrap();
        let server = TestServer::new(routes::routes(Arc::new(EmployeeService::new(pool)))).unwrap();

        let response = server
            .post("/api/employee/update-location")
            .json(&json!({
                "employee_code": "EMP-TEST",
                "latitude": 19.4326,
                "longitude": -99.1332,
                "station": "Zócalo",
                "line": "Línea 2"
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "success": true }));
    }
}
