use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};

use crate::alerts::repositories::AlertRepository;
use crate::alerts::ALERT_SORT_FIELD;
use crate::database_error;
use wellbeing_common::error::WellbeingResult;

#[derive(Clone)]
pub struct MongoAlertRepository {
    collection: Collection<Document>,
}

impl MongoAlertRepository {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            collection: db.collection(collection),
        }
    }
}

#[async_trait]
impl AlertRepository for MongoAlertRepository {
    async fn list_alerts(&self) -> WellbeingResult<Vec<Document>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { ALERT_SORT_FIELD: -1 })
            .await
            .map_err(database_error)?;

        cursor
            .try_collect::<Vec<Document>>()
            .await
            .map_err(database_error)
    }
}
