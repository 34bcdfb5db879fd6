mod automation_dto;

pub use automation_dto::{CreateAutomationDto, CreateAutomationResponseDto};
