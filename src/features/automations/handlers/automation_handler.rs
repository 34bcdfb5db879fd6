use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::automations::dtos::{CreateAutomationDto, CreateAutomationResponseDto};
use crate::features::automations::models::AutomationTask;
use crate::features::automations::services::AutomationStore;
use crate::shared::types::MessageResponse;

/// List automation tasks, newest first
#[utoipa::path(
    get,
    path = "/api/automatizacion",
    responses(
        (status = 200, description = "Registered tasks", body = Vec<AutomationTask>)
    ),
    tag = "automations"
)]
pub async fn list_automations(
    State(store): State<Arc<AutomationStore>>,
) -> Json<Vec<AutomationTask>> {
    Json(store.list().await)
}

/// Register an automation task
#[utoipa::path(
    post,
    path = "/api/automatizacion",
    request_body = CreateAutomationDto,
    responses(
        (status = 200, description = "Task stored", body = CreateAutomationResponseDto),
        (status = 400, description = "Validation error", body = crate::shared::types::ErrorResponse),
        (status = 500, description = "Document could not be written", body = crate::shared::types::ErrorResponse)
    ),
    tag = "automations"
)]
pub async fn create_automation(
    State(store): State<Arc<AutomationStore>>,
    AppJson(dto): AppJson<CreateAutomationDto>,
) -> Result<Json<CreateAutomationResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let id = store.create(dto.into()).await?;

    Ok(Json(CreateAutomationResponseDto {
        mensaje: "Guardado".to_string(),
        id,
    }))
}

/// Delete an automation task
#[utoipa::path(
    delete,
    path = "/api/automatizacion/{id}",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 400, description = "Invalid task ID", body = crate::shared::types::ErrorResponse),
        (status = 404, description = "Task not found", body = crate::shared::types::ErrorResponse)
    ),
    tag = "automations"
)]
pub async fn delete_automation(
    State(store): State<Arc<AutomationStore>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>> {
    store.delete(id).await?;
    Ok(Json(MessageResponse::new("Eliminado")))
}
