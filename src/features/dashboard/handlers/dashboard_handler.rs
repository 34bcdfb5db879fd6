use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::dtos::DashboardDto;
use crate::features::reports::handlers::{filters_from_pairs, QueryPairs};
use crate::features::reports::services::ReportQueryService;

/// Aggregated view over the filtered reports
///
/// With a `linea` filter the primary chart ranks stations within that line,
/// otherwise it ranks lines globally. Counts come from a single snapshot.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(
        ("linea" = Option<String>, Query, description = "Exact line name; switches the chart to stations"),
        ("estacion" = Option<String>, Query, description = "Exact station name"),
        ("fecha_inicio" = Option<String>, Query, description = "Start date (YYYY-MM-DD; an ISO datetime keeps its date), needs fecha_fin. Unparsable dates drop the range"),
        ("fecha_fin" = Option<String>, Query, description = "End date (YYYY-MM-DD; an ISO datetime keeps its date), needs fecha_inicio. Unparsable dates drop the range"),
        ("categorias" = Option<Vec<String>>, Query, description = "Categories, repeatable (categorias[] also accepted)")
    ),
    responses(
        (status = 200, description = "Dashboard aggregates", body = DashboardDto),
        (status = 500, description = "Storage failure", body = crate::shared::types::ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard(
    State(service): State<Arc<ReportQueryService>>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<DashboardDto>> {
    let filters = filters_from_pairs(&pairs);
    let dashboard = service.dashboard(&filters).await?;
    Ok(Json(dashboard))
}
