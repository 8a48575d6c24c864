pub mod alerts;
pub mod convert;
pub mod memory;
pub mod ordering;
pub mod stats;
pub mod work_location;

use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use wellbeing_common::error::{WellbeingError, WellbeingResult};
use wellbeing_config::{CollectionNames, MongoConfig};

use crate::alerts::mongo_repository::MongoAlertRepository;
use crate::alerts::repositories::AlertRepository;
use crate::memory::InMemoryStore;
use crate::stats::mongo_repository::MongoStatsRepository;
use crate::stats::repositories::StatsRepository;
use crate::work_location::mongo_repository::MongoWorkLocationRepository;
use crate::work_location::repositories::WorkLocationRepository;

const MAX_BACKOFF_SECS: u64 = 30;

/// Read handles for every collection the gateway serves.
#[derive(Clone)]
pub struct Store {
    pub stats: Arc<dyn StatsRepository>,
    pub alerts: Arc<dyn AlertRepository>,
    pub work_locations: Arc<dyn WorkLocationRepository>,
}

impl Store {
    pub fn mongo(db: &Database, collections: &CollectionNames) -> Self {
        Self {
            stats: Arc::new(MongoStatsRepository::new(db, &collections.stats)),
            alerts: Arc::new(MongoAlertRepository::new(db, &collections.alerts)),
            work_locations: Arc::new(MongoWorkLocationRepository::new(
                db,
                &collections.work_location,
            )),
        }
    }

    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            stats: store.clone(),
            alerts: store.clone(),
            work_locations: store,
        }
    }
}

/// Connect to MongoDB and verify the server answers a `ping`.
///
/// Failed attempts are retried `connect_retries` times with exponential
/// backoff (1s, 2s, 4s, ... capped at 30s).
pub async fn connect(config: &MongoConfig) -> WellbeingResult<Database> {
    let mut last_error = String::new();

    for attempt in 0..=config.connect_retries {
        if attempt > 0 {
            let backoff_secs = backoff_secs(attempt);
            tracing::warn!(attempt, backoff_secs, "retrying database connection after backoff");
            tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
        }

        match try_connect(config).await {
            Ok(db) => {
                tracing::info!(database = %config.database, "connected to database");
                return Ok(db);
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "database connection failed");
                last_error = e.to_string();
            }
        }
    }

    Err(WellbeingError::Database(format!(
        "giving up after {} attempts: {last_error}",
        config.connect_retries + 1
    )))
}

/// Seconds to wait before retry number `attempt` (1-based).
fn backoff_secs(attempt: u32) -> u64 {
    1u64.checked_shl(attempt.saturating_sub(1))
        .unwrap_or(u64::MAX)
        .min(MAX_BACKOFF_SECS)
}

async fn try_connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.uri).await?;
    options.app_name = Some("wellbeing-api".to_owned());
    options.server_selection_timeout = Some(Duration::from_secs(5));

    let client = Client::with_options(options)?;
    let db = client.database(&config.database);
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(db)
}

pub(crate) fn database_error(err: mongodb::error::Error) -> WellbeingError {
    WellbeingError::Database(err.to_string())
}
