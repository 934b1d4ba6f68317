use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Lesson};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Lesson>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Lesson>>;
}

pub struct MongoLessonRepository {
    collection: Collection<Lesson>,
}

impl MongoLessonRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("lessons");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for lessons collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for lessons collection");
        Ok(())
    }
}

#[async_trait]
impl LessonRepository for MongoLessonRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Lesson>> {
        let lesson = self.collection.find_one(doc! { "id": id }).await?;
        Ok(lesson)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Lesson>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let lessons = self
            .collection
            .find(doc! { "id": { "$in": ids } })
            .await?
            .try_collect()
            .await?;
        Ok(lessons)
    }
}
