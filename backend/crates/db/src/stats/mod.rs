pub mod mongo_repository;
pub mod repositories;

/// `_id` of the singleton snapshot document maintained by the pipeline.
pub const LIVE_COUNTS_ID: &str = "live_counts";
