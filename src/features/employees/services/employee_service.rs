use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::employees::dtos::UpdateLocationDto;

pub struct EmployeeService {
    pool: PgPool,
}

impl EmployeeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record the employee's current position and station
    pub async fn update_location(&self, dto: &UpdateLocationDto) -> Result<()> {
        let latitude = dto.latitude.map(to_coordinate).transpose()?;
        let longitude = dto.longitude.map(to_coordinate).transpose()?;

        let updated: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE employees
            SET current_latitude = $1, current_longitude = $2,
                current_station = $3, current_line = $4, last_update = NOW()
            WHERE employee_code = $5
            RETURNING id
            "#,
        )
        .bind(latitude)
        .bind(longitude)
        .bind(&dto.station)
        .bind(&dto.line)
        .bind(&dto.employee_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update employee location: {:?}", e);
            AppError::Database(e)
        })?;

        match updated {
            Some(id) => {
                tracing::debug!("Employee {} ({}) location updated", dto.employee_code, id);
                Ok(())
            }
            None => Err(AppError::NotFound("Empleado no encontrado".to_string())),
        }
    }
}

/// Coordinates are stored as DECIMAL(9,6)
fn to_coordinate(value: f64) -> Result<Decimal> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(6))
        .map_err(|_| AppError::Validation(format!("Invalid coordinate: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_coordinate_rounds_to_six_places() {
        let value = to_coordinate(19.432_607_891).unwrap();
        assert_eq!(value, Decimal::from_str("19.432608").unwrap());
    }

    #[test]
    fn test_coordinate_rejects_non_finite() {
        assert!(matches!(
            to_coordinate(f64::NAN),
            Err(AppError::Validation(_))
        ));
    }
}
