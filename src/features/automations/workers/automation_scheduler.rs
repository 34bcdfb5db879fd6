use std::sync::Arc;
use std::time::Duration;

use crate::features::automations::services::AutomationStore;

/// Periodic pass over the registered automation tasks.
///
/// Delivery is not wired yet; each tick only reports how many tasks are
/// registered.
pub struct AutomationScheduler {
    store: Arc<AutomationStore>,
    interval: Duration,
}

impl AutomationScheduler {
    pub fn new(store: Arc<AutomationStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub async fn run(self) {
        tracing::info!(
            "Automation scheduler started (every {}s, tasks in {})",
            self.interval.as_secs(),
            self.store.path().display()
        );

        let mut ticker = tokio::time::interval(self.interval);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// One pass; returns the number of registered tasks
    pub async fn tick(&self) -> usize {
        let count = self.store.len().await;
        tracing::debug!("Automation scheduler tick: {} task(s) registered", count);
        count
    }
}
