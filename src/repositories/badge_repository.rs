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
    models::domain::Badge,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeRepository: Send + Sync {
    async fn find_active(&self) -> AppResult<Vec<Badge>>;
    async fn find_all(&self) -> AppResult<Vec<Badge>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Badge>>;
    async fn create(&self, badge: Badge) -> AppResult<Badge>;
    async fn set_active(&self, id: &str, is_active: bool) -> AppResult<Badge>;
}

pub struct MongoBadgeRepository {
    collection: Collection<Badge>,
}

impl MongoBadgeRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("badges");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for badges collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let active_index = IndexModel::builder()
            .keys(doc! { "is_active": 1 })
            .options(IndexOptions::builder().name("is_active".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(active_index).await?;

        log::info!("Successfully created indexes for badges collection");
        Ok(())
    }

    async fn find_catalog(&self, filter: Document) -> AppResult<Vec<Badge>> {
        let documents: Vec<Document> = self
            .collection
            .clone_with_type::<Document>()
            .find(filter)
            .await?
            .try_collect()
            .await?;
        Ok(decode_catalog(documents))
    }
}

/// Entries that no longer decode, such as retired condition types, are logged
/// and left out so the rest of the catalog stays usable.
fn decode_catalog(documents: Vec<Document>) -> Vec<Badge> {
    documents
        .into_iter()
        .filter_map(|document| {
            let id = document.get_str("id").unwrap_or("<no id>").to_string();
            match from_document::<Badge>(document) {
                Ok(badge) => Some(badge),
                Err(err) => {
                    log::warn!("Skipping badge '{}' that could not be decoded: {}", id, err);
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl BadgeRepository for MongoBadgeRepository {
    async fn find_active(&self) -> AppResult<Vec<Badge>> {
        self.find_catalog(doc! { "is_active": true }).await
    }

    async fn find_all(&self) -> AppResult<Vec<Badge>> {
        self.find_catalog(doc! {}).await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Badge>> {
        let badge = self.collection.find_one(doc! { "id": id }).await?;
        Ok(badge)
    }

    async fn create(&self, badge: Badge) -> AppResult<Badge> {
        self.collection.insert_one(&badge).await?;
        Ok(badge)
    }

    async fn set_active(&self, id: &str, is_active: bool) -> AppResult<Badge> {
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": { "is_active": is_active } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Badge with id '{}' not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Badge with id '{}' not found", id)))
    }
}
