mod automation_task;

pub use automation_task::{AutomationTask, NewAutomationTask};
