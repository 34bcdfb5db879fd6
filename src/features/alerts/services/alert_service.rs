use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::alerts::dtos::PublicAlertDto;
use crate::features::alerts::models::{NewAlert, PublicAlert};
use crate::shared::constants::PUBLIC_ALERTS_LIMIT;

pub struct AlertService {
    pool: PgPool,
}

impl AlertService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an alert and return its id
    pub async fn create(&self, alert: &NewAlert) -> Result<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO admin_alerts (
                title, message, severity, category, line, station,
                send_to_public, send_to_manager, manager_category, created_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&alert.title)
        .bind(&alert.message)
        .bind(&alert.severity)
        .bind(&alert.category)
        .bind(&alert.line)
        .bind(&alert.station)
        .bind(alert.send_to_public)
        .bind(alert.send_to_manager)
        .bind(alert.manager_category())
        .bind(&alert.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create alert: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Alert {} created by {} (public: {})",
            id,
            alert.created_by,
            alert.send_to_public
        );
        Ok(id)
    }

    /// Latest alerts flagged for the public feed
    pub async fn list_public(&self) -> Result<Vec<PublicAlertDto>> {
        let alerts = sqlx::query_as::<_, PublicAlert>(
            r#"
            SELECT id, title, message, severity, line, station, created_at
            FROM admin_alerts
            WHERE send_to_public = true
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(PUBLIC_ALERTS_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list public alerts: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(alerts.into_iter().map(Into::into).collect())
    }
}
