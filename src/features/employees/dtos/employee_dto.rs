use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Position ping sent by a field employee's device
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLocationDto {
    #[validate(length(min = 1, max = 50))]
    pub employee_code: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    #[validate(length(max = 100))]
    pub station: Option<String>,

    #[validate(length(max = 50))]
    pub line: Option<String>,
}
