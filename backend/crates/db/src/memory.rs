//! Process-local store used by tests and local demos.
//!
//! Mirrors the query shapes of the MongoDB repositories (lookup by `_id`,
//! newest-first alerts, optional ascending location sort) over documents held
//! in memory. `fail_with` makes every read return a database error.

use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use crate::alerts::repositories::AlertRepository;
use crate::alerts::ALERT_SORT_FIELD;
use crate::ordering::compare_bson;
use crate::stats::repositories::StatsRepository;
use crate::stats::LIVE_COUNTS_ID;
use crate::work_location::repositories::WorkLocationRepository;
use crate::work_location::LOCATION_FIELD;
use wellbeing_common::error::{WellbeingError, WellbeingResult};

#[derive(Default)]
struct Collections {
    stats: Vec<Document>,
    alerts: Vec<Document>,
    impacts: Vec<Document>,
    failure: Option<String>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any document with the same `_id`, otherwise append.
    pub fn put_live_counts(&self, doc: Document) {
        self.write(|c| {
            let id = doc.get("_id").cloned();
            c.stats.retain(|existing| existing.get("_id").cloned() != id);
            c.stats.push(doc);
        });
    }

    pub fn insert_alert(&self, doc: Document) {
        self.write(|c| c.alerts.push(doc));
    }

    pub fn insert_impact(&self, doc: Document) {
        self.write(|c| c.impacts.push(doc));
    }

    /// Make subsequent reads fail with `message`; `None` restores normal reads.
    pub fn fail_with(&self, message: Option<String>) {
        self.write(|c| c.failure = message);
    }

    fn write(&self, f: impl FnOnce(&mut Collections)) {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard);
    }

    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> WellbeingResult<T> {
        let guard = self
            .inner
            .read()
            .map_err(|_| WellbeingError::Internal("in-memory store lock poisoned".into()))?;
        if let Some(message) = &guard.failure {
            return Err(WellbeingError::Database(message.clone()));
        }
        Ok(f(&guard))
    }
}

#[async_trait]
impl StatsRepository for InMemoryStore {
    async fn get_live_counts(&self) -> WellbeingResult<Option<Document>> {
        self.read(|c| {
            c.stats
                .iter()
                .find(|d| matches!(d.get("_id"), Some(Bson::String(id)) if id == LIVE_COUNTS_ID))
                .cloned()
        })
    }
}

#[async_trait]
impl AlertRepository for InMemoryStore {
    async fn list_alerts(&self) -> WellbeingResult<Vec<Document>> {
        self.read(|c| {
            let mut rows = c.alerts.clone();
            rows.sort_by(|a, b| compare_bson(b.get(ALERT_SORT_FIELD), a.get(ALERT_SORT_FIELD)));
            rows
        })
    }
}

#[async_trait]
impl WorkLocationRepository for InMemoryStore {
    async fn list_impacts(&self, sorted: bool) -> WellbeingResult<Vec<Document>> {
        self.read(|c| {
            let mut rows = c.impacts.clone();
            if sorted {
                rows.sort_by(|a, b| compare_bson(a.get(LOCATION_FIELD), b.get(LOCATION_FIELD)));
            }
            rows
        })
    }

    async fn get_by_location(&self, location: &str) -> WellbeingResult<Option<Document>> {
        self.read(|c| {
            c.impacts
                .iter()
                .find(|d| matches!(d.get(LOCATION_FIELD), Some(Bson::String(l)) if l == location))
                .cloned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, DateTime};

    #[tokio::test]
    async fn live_counts_lookup_ignores_other_ids() {
        let store = InMemoryStore::new();
        store.put_live_counts(doc! { "_id": "hourly", "stress_high": 3 });
        assert!(store.get_live_counts().await.expect("read").is_none());

        store.put_live_counts(doc! { "_id": "live_counts", "stress_high": 3 });
        store.put_live_counts(doc! { "_id": "live_counts", "stress_high": 9 });
        let counts = store.get_live_counts().await.expect("read").expect("present");
        assert_eq!(counts.get_i32("stress_high").expect("field"), 9);
    }

    #[tokio::test]
    async fn alerts_come_back_newest_first() {
        let store = InMemoryStore::new();
        store.insert_alert(doc! { "department": "Sales", "alertTimestamp": DateTime::from_millis(1_000) });
        store.insert_alert(doc! { "department": "Ops", "alertTimestamp": DateTime::from_millis(3_000) });
        store.insert_alert(doc! { "department": "HR", "alertTimestamp": DateTime::from_millis(2_000) });

        let rows = store.list_alerts().await.expect("read");
        let departments: Vec<&str> = rows
            .iter()
            .map(|d| d.get_str("department").expect("department"))
            .collect();
        assert_eq!(departments, vec!["Ops", "HR", "Sales"]);
    }

    #[tokio::test]
    async fn impacts_keep_insertion_order_unless_sorted() {
        let store = InMemoryStore::new();
        store.insert_impact(doc! { "workLocation": "Remote" });
        store.insert_impact(doc! { "workLocation": "Hybrid" });

        let natural = store.list_impacts(false).await.expect("read");
        assert_eq!(natural[0].get_str(LOCATION_FIELD).expect("loc"), "Remote");

        let sorted = store.list_impacts(true).await.expect("read");
        assert_eq!(sorted[0].get_str(LOCATION_FIELD).expect("loc"), "Hybrid");
    }

    #[tokio::test]
    async fn injected_failure_surfaces_as_database_error() {
        let store = InMemoryStore::new();
        store.fail_with(Some("connection reset".into()));

        let err = store.list_alerts().await.expect_err("should fail");
        assert!(matches!(err, WellbeingError::Database(ref m) if m == "connection reset"));

        store.fail_with(None);
        assert!(store.list_alerts().await.is_ok());
    }
}
