pub mod dtos;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{ReportQueryService, ReportService};
