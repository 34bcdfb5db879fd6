use async_trait::async_trait;
use serde::Deserialize;

use crate::core::error::Result;

/// Label predicted for a piece of text
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub label: String,
    /// Probability of `label`, in `[0, 1]`
    pub confidence: f64,
}

impl Classification {
    /// Confidence rounded to 4 decimals for API responses
    pub fn rounded_confidence(&self) -> f64 {
        (self.confidence * 10_000.0).round() / 10_000.0
    }
}

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_confidence() {
        let classification = Classification {
            label: "positivo".to_string(),
            confidence: 0.987_654_3,
        };
        assert_eq!(classification.rounded_confidence(), 0.9877);
    }
}
