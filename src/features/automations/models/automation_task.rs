use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Scheduled report delivery registered by an operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AutomationTask {
    /// Seconds since the epoch at creation, bumped to stay unique
    pub id: i64,
    pub email: Option<String>,
    pub fecha_inicio: Option<String>,
    pub frecuencia: Option<String>,
    /// Dashboard filters stored as sent by the client
    #[schema(value_type = Object)]
    pub filtros: Option<serde_json::Value>,
}

/// Task fields before an id is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewAutomationTask {
    pub email: Option<String>,
    pub fecha_inicio: Option<String>,
    pub frecuencia: Option<String>,
    pub filtros: Option<serde_json::Value>,
}

impl NewAutomationTask {
    pub fn with_id(self, id: i64) -> AutomationTask {
        AutomationTask {
            id,
            email: self.email,
            fecha_inicio: self.fecha_inicio,
            frecuencia: self.frecuencia,
            filtros: self.filtros,
        }
    }
}
