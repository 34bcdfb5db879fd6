use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::reports::models::ReportSummary;

/// Row of the report listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportSummaryDto {
    pub linea: Option<String>,
    pub estacion: Option<String>,
    /// Sender name
    pub nombre: Option<String>,
    pub asunto: Option<String>,
    pub fecha: Option<NaiveDate>,
    pub categoria: Option<String>,
    /// Sentiment label assigned at submission
    pub opinion: Option<String>,
}

impl From<ReportSummary> for ReportSummaryDto {
    fn from(r: ReportSummary) -> Self {
        Self {
            linea: r.linea,
            estacion: r.estacion,
            nombre: r.nombre_remitente,
            asunto: r.asunto,
            fecha: r.fecha,
            categoria: r.categoria,
            opinion: r.opinion,
        }
    }
}

/// Rider report submitted from the public form
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[validate(length(min = 1, max = 50))]
    pub linea: String,

    #[validate(length(min = 1, max = 100))]
    pub estacion: String,

    #[validate(length(max = 100))]
    pub nombre_remitente: Option<String>,

    #[validate(email, length(max = 100))]
    pub email_remitente: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub categoria: String,

    #[validate(length(min = 1, max = 255))]
    pub asunto: String,

    #[validate(length(min = 1))]
    pub contenido: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SentimentAnalysisDto {
    pub sentimiento: String,
    /// Classifier confidence rounded to 4 decimals
    pub confianza: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportSubmissionResponseDto {
    pub mensaje: String,
    pub analisis_ia: SentimentAnalysisDto,
}
