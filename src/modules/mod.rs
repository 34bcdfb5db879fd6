//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services such as the sentiment model.

pub mod sentiment;
