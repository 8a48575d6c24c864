pub mod mongo_repository;
pub mod repositories;

/// Alerts are served newest first on this field.
pub const ALERT_SORT_FIELD: &str = "alertTimestamp";
