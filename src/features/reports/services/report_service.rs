use chrono::Local;
use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    CreateReportDto, ReportSubmissionResponseDto, SentimentAnalysisDto,
};
use crate::features::reports::models::NewReport;
use crate::modules::sentiment::SentimentClassifier;

/// Write side of the report history: classify and store rider submissions
pub struct ReportService {
    pool: PgPool,
    classifier: Arc<dyn SentimentClassifier>,
}

impl ReportService {
    pub fn new(pool: PgPool, classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { pool, classifier }
    }

    /// Classify the subject line, then store the report dated today
    pub async fn submit(&self, dto: CreateReportDto) -> Result<ReportSubmissionResponseDto> {
        let classification = self.classifier.classify(&dto.asunto).await?;

        tracing::info!(
            "Report for {} / {} classified as '{}' (confidence {:.4})",
            dto.linea,
            dto.estacion,
            classification.label,
            classification.confidence
        );

        let report = NewReport {
            linea: dto.linea,
            estacion: dto.estacion,
            nombre_remitente: dto.nombre_remitente,
            email_remitente: dto.email_remitente,
            asunto: dto.asunto,
            contenido: dto.contenido,
            categoria: dto.categoria,
            opinion: classification.label.clone(),
            fecha: Local::now().date_naive(),
        };
        self.insert(&report).await?;

        Ok(ReportSubmissionResponseDto {
            mensaje: "Reporte recibido, procesado y guardado en DB".to_string(),
            analisis_ia: SentimentAnalysisDto {
                sentimiento: classification.label.clone(),
                confianza: classification.rounded_confidence(),
            },
        })
    }

    async fn insert(&self, report: &NewReport) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO datos_metro_cdmx (
                linea, estacion, nombre_remitente, email_remitente, asunto,
                contenido, categoria, opinion, fecha
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&report.linea)
        .bind(&report.estacion)
        .bind(&report.nombre_remitente)
        .bind(&report.email_remitente)
        .bind(&report.asunto)
        .bind(&report.contenido)
        .bind(&report.categoria)
        .bind(&report.opinion)
        .bind(report.fecha)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(())
    }
}
