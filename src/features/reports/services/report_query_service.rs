use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::DashboardDto;
use crate::features::dashboard::services::{count_query, AggregationPlan};
use crate::features::reports::dtos::ReportSummaryDto;
use crate::features::reports::filters::FilterSet;
use crate::features::reports::models::ReportSummary;
use crate::shared::constants::{REPORTS_TABLE, REPORT_LIST_LIMIT};

/// Read side of the report history: filtered listing and dashboard aggregates
pub struct ReportQueryService {
    pool: PgPool,
}

impl ReportQueryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Newest reports matching the filters, at most 500.
    /// Reports sharing a date come back in database order.
    pub async fn list(&self, filters: &FilterSet) -> Result<Vec<ReportSummaryDto>> {
        let predicate = filters.predicate();
        tracing::debug!(
            "Listing reports: {} clause(s), {} bound value(s){}",
            predicate.clauses().len(),
            predicate.arity(),
            predicate.render().sql
        );

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT linea, estacion, nombre_remitente, asunto, fecha, categoria, opinion FROM {}",
            REPORTS_TABLE
        ));
        predicate.write_where(&mut query);
        query.push(" ORDER BY fecha DESC LIMIT ");
        query.push_bind(REPORT_LIST_LIMIT);

        let rows = query
            .build_query_as::<ReportSummary>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(ReportSummaryDto::from).collect())
    }

    /// Total plus both aggregate series, read from a single snapshot so the
    /// sentiment counts always add up to the total.
    pub async fn dashboard(&self, filters: &FilterSet) -> Result<DashboardDto> {
        let predicate = filters.predicate();
        let plan = AggregationPlan::for_filters(filters);
        tracing::debug!(
            "Computing dashboard '{}' by {:?}: {} bound value(s){}",
            plan.title(),
            plan.dimension(),
            predicate.arity(),
            predicate.render().sql
        );

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to open dashboard transaction: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let total: i64 = count_query(&predicate)
            .build_query_scalar::<i64>()
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count reports: {:?}", e);
                AppError::Database(e)
            })?;

        let series = plan.fetch(&mut *tx, &predicate).await?;

        tx.commit().await.map_err(AppError::Database)?;

        let dashboard = plan.into_dashboard(total, series);
        if dashboard.por_opinion.sum() != dashboard.total {
            tracing::warn!(
                "Sentiment counts ({}) do not add up to the total ({})",
                dashboard.por_opinion.sum(),
                dashboard.total
            );
        }

        Ok(dashboard)
    }
}
