use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};

use crate::database_error;
use crate::stats::repositories::StatsRepository;
use crate::stats::LIVE_COUNTS_ID;
use wellbeing_common::error::WellbeingResult;

#[derive(Clone)]
pub struct MongoStatsRepository {
    collection: Collection<Document>,
}

impl MongoStatsRepository {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            collection: db.collection(collection),
        }
    }
}

#[async_trait]
impl StatsRepository for MongoStatsRepository {
    async fn get_live_counts(&self) -> WellbeingResult<Option<Document>> {
        self.collection
            .find_one(doc! { "_id": LIVE_COUNTS_ID })
            .await
            .map_err(database_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect;
    use wellbeing_config::MongoConfig;

    async fn test_repo(suffix: &str) -> Option<(MongoStatsRepository, Collection<Document>)> {
        let uri = std::env::var("TEST_MONGO_URI").ok()?;
        let db = connect(&MongoConfig {
            uri,
            database: "wellbeing_test".to_owned(),
            connect_retries: 0,
        })
        .await
        .expect("db should connect");

        let name = format!("stats_{}_{suffix}", std::process::id());
        let collection = db.collection::<Document>(&name);
        collection
            .delete_many(doc! {})
            .await
            .expect("clear stats collection");

        Some((MongoStatsRepository::new(&db, &name), collection))
    }

    #[tokio::test]
    async fn returns_none_when_snapshot_missing() {
        let (repo, _collection) = match test_repo("missing").await {
            Some(r) => r,
            None => return,
        };

        let result = repo.get_live_counts().await.expect("get_live_counts");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn returns_snapshot_verbatim() {
        let (repo, collection) = match test_repo("verbatim").await {
            Some(r) => r,
            None => return,
        };
        let snapshot = doc! {
            "_id": LIVE_COUNTS_ID,
            "stress_high": 20,
            "stress_low": 50,
            "work_remote": 650,
        };
        collection
            .insert_one(snapshot.clone())
            .await
            .expect("seed snapshot");

        let found = repo
            .get_live_counts()
            .await
            .expect("get_live_counts")
            .expect("snapshot present");
        assert_eq!(found, snapshot);

        collection.drop().await.expect("drop collection");
    }
}
