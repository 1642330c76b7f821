use chrono::{DateTime, Utc};

/// Source of "now" for record timestamps (`created_at`, `updated_at`,
/// reference `imported_at`).
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
