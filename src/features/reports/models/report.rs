use chrono::NaiveDate;
use sqlx::FromRow;

/// Projection of a report row used by the report listing
#[derive(Debug, Clone, FromRow)]
pub struct ReportSummary {
    pub linea: Option<String>,
    pub estacion: Option<String>,
    pub nombre_remitente: Option<String>,
    pub asunto: Option<String>,
    pub fecha: Option<NaiveDate>,
    pub categoria: Option<String>,
    pub opinion: Option<String>,
}

/// Data for inserting a classified report
#[derive(Debug, Clone)]
pub struct NewReport {
    pub linea: String,
    pub estacion: String,
    pub nombre_remitente: Option<String>,
    pub email_remitente: Option<String>,
    pub asunto: String,
    pub contenido: String,
    pub categoria: String,
    pub opinion: String,
    pub fecha: NaiveDate,
}

/// One `(label, count)` row of a grouped aggregate
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct GroupCount {
    pub label: Option<String>,
    pub total: i64,
}
