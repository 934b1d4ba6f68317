use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::UserProgress,
};

/// One record per (user, lesson). `insert` reports a clash on that pair as
/// `AppError::AlreadyExists`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn find_by_user_and_lesson(
        &self,
        user_id: &str,
        lesson_id: &str,
    ) -> AppResult<Option<UserProgress>>;
    async fn insert(&self, progress: UserProgress) -> AppResult<UserProgress>;
    async fn update(&self, progress: UserProgress) -> AppResult<UserProgress>;
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<UserProgress>>;
    async fn count_completed(&self, user_id: &str) -> AppResult<i64>;
    /// Most recently attempted records first.
    async fn find_recent(&self, user_id: &str, limit: usize) -> AppResult<Vec<UserProgress>>;
}

pub struct MongoProgressRepository {
    collection: Collection<UserProgress>,
}

impl MongoProgressRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("user_progress");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for user_progress collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_lesson_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "lesson_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_lesson_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_lesson_index).await?;

        log::info!("Successfully created indexes for user_progress collection");
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for MongoProgressRepository {
    async fn find_by_user_and_lesson(
        &self,
        user_id: &str,
        lesson_id: &str,
    ) -> AppResult<Option<UserProgress>> {
        let progress = self
            .collection
            .find_one(doc! {
                "user_id": user_id,
                "lesson_id": lesson_id
            })
            .await?;
        Ok(progress)
    }

    async fn insert(&self, progress: UserProgress) -> AppResult<UserProgress> {
        self.collection.insert_one(&progress).await?;
        Ok(progress)
    }

    async fn update(&self, progress: UserProgress) -> AppResult<UserProgress> {
        let result = self
            .collection
            .replace_one(doc! { "id": &progress.id }, &progress)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Progress with id '{}' not found",
                progress.id
            )));
        }

        Ok(progress)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<UserProgress>> {
        let records = self
            .collection
            .find(doc! { "user_id": user_id })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    async fn count_completed(&self, user_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "user_id": user_id, "completed": true })
            .await?;
        Ok(count as i64)
    }

    async fn find_recent(&self, user_id: &str, limit: usize) -> AppResult<Vec<UserProgress>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let documents: Vec<Document> = self
            .collection
            .aggregate(recent_pipeline(user_id, limit))
            .await?
            .try_collect()
            .await?;

        documents
            .into_iter()
            .map(|document| {
                from_document::<UserProgress>(document)
                    .map_err(|e| AppError::DatabaseError(e.to_string()))
            })
            .collect()
    }
}

/// Timestamps are stored as RFC 3339 strings, whose text order is not
/// chronological, so the sort runs on `$toDate` of the stored value.
fn recent_pipeline(user_id: &str, limit: usize) -> Vec<Document> {
    vec![
        doc! { "$match": { "user_id": user_id } },
        doc! { "$addFields": { "attempted_at": { "$toDate": "$last_attempt_at" } } },
        doc! { "$sort": { "attempted_at": -1 } },
        doc! { "$limit": limit as i64 },
        doc! { "$project": { "_id": 0, "attempted_at": 0 } },
    ]
}
