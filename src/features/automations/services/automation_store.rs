use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::automations::models::{AutomationTask, NewAutomationTask};

/// Automation tasks kept in memory and mirrored to one JSON document.
///
/// Every operation serializes on a single mutex. Mutations rewrite the whole
/// document through a temp file and a rename, and are undone in memory when
/// the write fails, so the file and the list never disagree.
pub struct AutomationStore {
    path: PathBuf,
    tasks: Mutex<Vec<AutomationTask>>,
}

impl AutomationStore {
    /// Load the document at `path`. A missing file is created empty; an
    /// unreadable document is treated as empty.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let tasks = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<AutomationTask>>(&bytes) {
                Ok(tasks) => tasks,
                Err(e) => {
                    tracing::warn!(
                        "Automation document {} is not a task list, starting empty: {}",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                write_document(&path, &[]).await?;
                tracing::info!("Created automation document at {}", path.display());
                Vec::new()
            }
            Err(e) => {
                return Err(AppError::Internal(format!(
                    "Failed to read automation document {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::info!("Loaded {} automation task(s)", tasks.len());

        Ok(Self {
            path,
            tasks: Mutex::new(tasks),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store a task and return its id
    pub async fn create(&self, task: NewAutomationTask) -> Result<i64> {
        let mut tasks = self.tasks.lock().await;

        let id = next_id(&tasks, Utc::now().timestamp());
        tasks.push(task.with_id(id));

        if let Err(e) = write_document(&self.path, &tasks).await {
            tasks.pop();
            return Err(e);
        }

        tracing::info!("Automation task {} created", id);
        Ok(id)
    }

    /// All tasks, newest id first
    pub async fn list(&self) -> Vec<AutomationTask> {
        let mut tasks = self.tasks.lock().await.clone();
        tasks.sort_by(|a, b| b.id.cmp(&a.id));
        tasks
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tasks = self.tasks.lock().await;

        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound("No encontrado".to_string()))?;
        let removed = tasks.remove(index);

        if let Err(e) = write_document(&self.path, &tasks).await {
            tasks.insert(index, removed);
            return Err(e);
        }

        tracing::info!("Automation task {} deleted", id);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.tasks.lock().await.len()
    }
}

/// Current time in seconds, or one past the largest existing id when the
/// clock would not produce a strictly greater value
fn next_id(tasks: &[AutomationTask], now: i64) -> i64 {
    match tasks.iter().map(|t| t.id).max() {
        Some(max) if now <= max => max + 1,
        _ => now,
    }
}

async fn write_document(path: &Path, tasks: &[AutomationTask]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(tasks)
        .map_err(|e| AppError::Internal(format!("Failed to encode automation tasks: {}", e)))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
        tracing::error!("Failed to write {}: {}", tmp.display(), e);
        AppError::Internal(format!("Failed to save automation tasks: {}", e))
    })?;

    tokio::fs::rename(&tmp, path).await.map_err(|e| {
        tracing::error!("Failed to replace {}: {}", path.display(), e);
        AppError::Internal(format!("Failed to save automation tasks: {}", e))
    })
}
