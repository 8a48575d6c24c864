use async_trait::async_trait;
use mongodb::bson::Document;

use wellbeing_common::error::WellbeingResult;

#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Every burnout alert, ordered by `alertTimestamp` descending.
    async fn list_alerts(&self) -> WellbeingResult<Vec<Document>>;
}
