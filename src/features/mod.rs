pub mod alerts;
pub mod automations;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod reports;
