mod automation_store;

pub use automation_store::AutomationStore;
