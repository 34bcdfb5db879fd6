mod automation_scheduler;

pub use automation_scheduler::AutomationScheduler;
