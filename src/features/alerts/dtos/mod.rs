mod alert_dto;

pub use alert_dto::{CreateAlertDto, PublicAlertDto};
