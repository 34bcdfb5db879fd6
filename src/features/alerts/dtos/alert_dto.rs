use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::alerts::models::{NewAlert, PublicAlert};

const DEFAULT_AUTHOR: &str = "Admin";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAlertDto {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1))]
    pub message: String,

    #[validate(length(max = 20))]
    pub severity: Option<String>,

    #[validate(length(max = 50))]
    pub category: Option<String>,

    #[validate(length(max = 50))]
    pub line: Option<String>,

    #[validate(length(max = 100))]
    pub station: Option<String>,

    #[serde(default)]
    pub send_to_public: bool,

    #[serde(default)]
    pub send_to_manager: bool,

    /// Defaults to `Admin`
    #[validate(length(max = 100))]
    pub created_by: Option<String>,
}

impl From<CreateAlertDto> for NewAlert {
    fn from(dto: CreateAlertDto) -> Self {
        Self {
            title: dto.title,
            message: dto.message,
            severity: dto.severity,
            category: dto.category,
            line: dto.line,
            station: dto.station,
            send_to_public: dto.send_to_public,
            send_to_manager: dto.send_to_manager,
            created_by: dto
                .created_by
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicAlertDto {
    pub id: i32,
    pub title: Option<String>,
    pub message: Option<String>,
    pub severity: Option<String>,
    pub line: Option<String>,
    pub station: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<PublicAlert> for PublicAlertDto {
    fn from(a: PublicAlert) -> Self {
        Self {
            id: a.id,
            title: a.title,
            message: a.message,
            severity: a.severity,
            line: a.line,
            station: a.station,
            created_at: a.created_at,
        }
    }
}
