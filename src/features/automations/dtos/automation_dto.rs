use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::automations::models::NewAutomationTask;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAutomationDto {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 32))]
    pub fecha_inicio: String,

    #[validate(length(min = 1, max = 50))]
    pub frecuencia: String,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub filtros: Option<serde_json::Value>,
}

impl From<CreateAutomationDto> for NewAutomationTask {
    fn from(dto: CreateAutomationDto) -> Self {
        Self {
            email: Some(dto.email),
            fecha_inicio: Some(dto.fecha_inicio),
            frecuencia: Some(dto.frecuencia),
            filtros: dto.filtros,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAutomationResponseDto {
    pub mensaje: String,
    pub id: i64,
}
