use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Row of `admin_alerts` exposed on the public feed
#[derive(Debug, Clone, FromRow)]
pub struct PublicAlert {
    pub id: i32,
    pub title: Option<String>,
    pub message: Option<String>,
    pub severity: Option<String>,
    pub line: Option<String>,
    pub station: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// Data for creating an alert
#[derive(Debug)]
pub struct NewAlert {
    pub title: String,
    pub message: String,
    pub severity: Option<String>,
    pub category: Option<String>,
    pub line: Option<String>,
    pub station: Option<String>,
    pub send_to_public: bool,
    pub send_to_manager: bool,
    pub created_by: String,
}

impl NewAlert {
    /// Managers are routed by the alert's own category
    pub fn manager_category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}
