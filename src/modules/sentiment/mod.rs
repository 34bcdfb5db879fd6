//! Sentiment classification module
//!
//! The model itself runs in a separate serving process. This module defines the
//! classification seam used by report submission and an HTTP client for that process.

mod classifier;
mod http_classifier;

pub use classifier::{Classification, SentimentClassifier};
pub use http_classifier::HttpSentimentClassifier;
