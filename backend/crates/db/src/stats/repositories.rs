use async_trait::async_trait;
use mongodb::bson::Document;

use wellbeing_common::error::WellbeingResult;

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// The `live_counts` snapshot, or `None` if the pipeline has not written one yet.
    async fn get_live_counts(&self) -> WellbeingResult<Option<Document>>;
}
