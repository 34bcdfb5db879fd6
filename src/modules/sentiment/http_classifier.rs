use async_trait::async_trait;
use serde::Serialize;

use crate::core::config::ClassifierConfig;
use crate::core::error::{AppError, Result};
use crate::modules::sentiment::{Classification, SentimentClassifier};

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

/// Client for the model-serving process.
///
/// Sends `POST {url}` with `{"text": ...}` and expects `{"label": ..., "confidence": ...}`.
pub struct HttpSentimentClassifier {
    client: reqwest::Client,
    url: String,
}

impl HttpSentimentClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("MetroReportes/0.1 (sentiment-client)")
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl SentimentClassifier for HttpSentimentClassifier {
    async fn classify(&self, text: &str) -> Result<Classification> {
        tracing::debug!("Classifying {} chars via {}", text.len(), self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&ClassifyRequest { text })
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Classifier unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Classifier returned status {}",
                response.status()
            )));
        }

        response
            .json::<Classification>()
            .await
            .map_err(|e| AppError::ExternalService(format!("Invalid classifier response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn spawn_model_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/predict", addr)
    }

    fn classifier(url: String) -> HttpSentimentClassifier {
        HttpSentimentClassifier::new(&ClassifierConfig {
            url,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_classify_parses_model_response() {
        let router = Router::new().route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                let label = if body["text"].as_str().unwrap_or("").contains("excelente") {
                    "positivo"
                } else {
                    "negativo"
                };
                Json(json!({ "label": label, "confidence": 0.91 }))
            }),
        );
        let url = spawn_model_server(router).await;

        let result = classifier(url)
            .classify("Servicio excelente en la línea 3")
            .await
            .unwrap();

        assert_eq!(result.label, "positivo");
        assert_eq!(result.confidence, 0.91);
    }

    #[tokio::test]
    async fn test_classify_maps_server_error() {
        let router = Router::new().route(
            "/predict",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let url = spawn_model_server(router).await;

        let result = classifier(url).classify("texto").await;

        assert!(matches!(result, Err(AppError::ExternalService(_))));
    }

    #[tokio::test]
    async fn test_classify_rejects_malformed_body() {
        let router = Router::new().route(
            "/predict",
            post(|| async { Json(json!({ "sentiment": "pos" })) }),
        );
        let url = spawn_model_server(router).await;

        let result = classifier(url).classify("texto").await;

        assert!(matches!(result, Err(AppError::ExternalService(_))));
    }
}
