use async_trait::async_trait;
use mongodb::bson::Document;

use wellbeing_common::error::WellbeingResult;

#[async_trait]
pub trait WorkLocationRepository: Send + Sync {
    /// Every location-impact document; ordered by `workLocation` ascending
    /// when `sorted`, natural order otherwise.
    async fn list_impacts(&self, sorted: bool) -> WellbeingResult<Vec<Document>>;

    /// The first document whose `workLocation` equals `location`.
    async fn get_by_location(&self, location: &str) -> WellbeingResult<Option<Document>>;
}
