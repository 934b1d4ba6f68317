use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Exercise};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Exercise>>;
    /// Unknown ids are left out of the result rather than reported.
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Exercise>>;
}

pub struct MongoExerciseRepository {
    collection: Collection<Exercise>,
}

impl MongoExerciseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("exercises");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for exercises collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let lesson_index = IndexModel::builder()
            .keys(doc! { "lesson_id": 1 })
            .options(IndexOptions::builder().name("lesson_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(lesson_index).await?;

        log::info!("Successfully created indexes for exercises collection");
        Ok(())
    }
}

#[async_trait]
impl ExerciseRepository for MongoExerciseRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Exercise>> {
        let exercise = self.collection.find_one(doc! { "id": id }).await?;
        Ok(exercise)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Exercise>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let exercises = self
            .collection
            .find(doc! { "id": { "$in": ids } })
            .await?
            .try_collect()
            .await?;
        Ok(exercises)
    }
}
