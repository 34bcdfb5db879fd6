use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{
    CreateReportDto, ReportSubmissionResponseDto, ReportSummaryDto,
};
use crate::features::reports::filters::FilterSet;
use crate::features::reports::services::{ReportQueryService, ReportService};

/// Shared state for report routes
#[derive(Clone)]
pub struct ReportState {
    pub query_service: Arc<ReportQueryService>,
    pub report_service: Arc<ReportService>,
}

/// Raw query string as ordered pairs, so repeated keys survive
pub type QueryPairs = Vec<(String, String)>;

pub fn filters_from_pairs(pairs: &QueryPairs) -> FilterSet {
    FilterSet::from_query_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

/// List reports matching the filters (newest first, at most 500)
#[utoipa::path(
    get,
    path = "/api/reporte",
    params(
        ("linea" = Option<String>, Query, description = "Exact line name"),
        ("estacion" = Option<String>, Query, description = "Exact station name"),
        ("fecha_inicio" = Option<String>, Query, description = "Start date (YYYY-MM-DD; an ISO datetime keeps its date), needs fecha_fin. Unparsable dates drop the range"),
        ("fecha_fin" = Option<String>, Query, description = "End date (YYYY-MM-DD; an ISO datetime keeps its date), needs fecha_inicio. Unparsable dates drop the range"),
        ("categorias" = Option<Vec<String>>, Query, description = "Categories, repeatable (categorias[] also accepted)")
    ),
    responses(
        (status = 200, description = "Matching reports", body = Vec<ReportSummaryDto>),
        (status = 500, description = "Storage failure", body = crate::shared::types::ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<ReportState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<Vec<ReportSummaryDto>>> {
    let filters = filters_from_pairs(&pairs);
    let reports = state.query_service.list(&filters).await?;
    Ok(Json(reports))
}

/// Submit a rider report; the subject line is classified before storing
#[utoipa::path(
    post,
    path = "/reportes",
    request_body = CreateReportDto,
    responses(
        (status = 200, description = "Report classified and stored", body = ReportSubmissionResponseDto),
        (status = 400, description = "Validation error", body = crate::shared::types::ErrorResponse),
        (status = 502, description = "Classifier unavailable", body = crate::shared::types::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::shared::types::ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn submit_report(
    State(state): State<ReportState>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<Json<ReportSubmissionResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = state.report_service.submit(dto).await?;
    Ok(Json(response))
}
