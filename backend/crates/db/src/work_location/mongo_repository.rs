use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};

use crate::database_error;
use crate::work_location::repositories::WorkLocationRepository;
use crate::work_location::LOCATION_FIELD;
use wellbeing_common::error::WellbeingResult;

#[derive(Clone)]
pub struct MongoWorkLocationRepository {
    collection: Collection<Document>,
}

impl MongoWorkLocationRepository {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            collection: db.collection(collection),
        }
    }
}

#[async_trait]
impl WorkLocationRepository for MongoWorkLocationRepository {
    async fn list_impacts(&self, sorted: bool) -> WellbeingResult<Vec<Document>> {
        let find = self.collection.find(doc! {});
        let find = if sorted {
            find.sort(doc! { LOCATION_FIELD: 1 })
        } else {
            find
        };

        let cursor = find.await.map_err(database_error)?;
        cursor
            .try_collect::<Vec<Document>>()
            .await
            .map_err(database_error)
    }

    async fn get_by_location(&self, location: &str) -> WellbeingResult<Option<Document>> {
        self.collection
            .find_one(doc! { LOCATION_FIELD: location })
            .await
            .map_err(database_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect;
    use wellbeing_config::MongoConfig;

    async fn test_repo(
        suffix: &str,
    ) -> Option<(MongoWorkLocationRepository, Collection<Document>)> {
        let uri = std::env::var("TEST_MONGO_URI").ok()?;
        let db = connect(&MongoConfig {
            uri,
            database: "wellbeing_test".to_owned(),
            connect_retries: 0,
        })
        .await
        .expect("db should connect");

        let name = format!("work_location_{}_{suffix}", std::process::id());
        let collection = db.collection::<Document>(&name);
        collection
            .delete_many(doc! {})
            .await
            .expect("clear work location collection");

        collection
            .insert_many(vec![
                doc! { "workLocation": "Remote", "totalEmployees": "120", "avgStress": 2.3 },
                doc! { "workLocation": "Hybrid", "totalEmployees": 80, "avgStress": 2.1 },
                doc! { "workLocation": "Onsite", "totalEmployees": 95, "avgStress": 2.6 },
            ])
            .await
            .expect("seed work locations");

        Some((MongoWorkLocationRepository::new(&db, &name), collection))
    }

    #[tokio::test]
    async fn sorted_listing_is_alphabetical() {
        let (repo, collection) = match test_repo("sorted").await {
            Some(r) => r,
            None => return,
        };

        let rows = repo.list_impacts(true).await.expect("list_impacts");
        let locations: Vec<&str> = rows
            .iter()
            .map(|d| d.get_str(LOCATION_FIELD).expect("workLocation"))
            .collect();
        assert_eq!(locations, vec!["Hybrid", "Onsite", "Remote"]);

        collection.drop().await.expect("drop collection");
    }

    #[tokio::test]
    async fn finds_single_location() {
        let (repo, collection) = match test_repo("single").await {
            Some(r) => r,
            None => return,
        };

        let remote = repo
            .get_by_location("Remote")
            .await
            .expect("get_by_location")
            .expect("remote row");
        assert_eq!(remote.get_str("totalEmployees").expect("raw string"), "120");

        let missing = repo.get_by_location("Moon").await.expect("get_by_location");
        assert!(missing.is_none());

        collection.drop().await.expect("drop collection");
    }
}
