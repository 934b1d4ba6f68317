use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::UserBadge};

/// Earned badges. At most one record per (user, badge); `create` reports a
/// second award as `AppError::AlreadyExists`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserBadgeRepository: Send + Sync {
    async fn create(&self, user_badge: UserBadge) -> AppResult<UserBadge>;
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<UserBadge>>;
    async fn find_badge_ids_by_user(&self, user_id: &str) -> AppResult<Vec<String>>;
}

pub struct MongoUserBadgeRepository {
    collection: Collection<UserBadge>,
}

impl MongoUserBadgeRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("user_badges");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for user_badges collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_badge_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "badge_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_badge_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_badge_index).await?;

        log::info!("Successfully created indexes for user_badges collection");
        Ok(())
    }
}

#[async_trait]
impl UserBadgeRepository for MongoUserBadgeRepository {
    async fn create(&self, user_badge: UserBadge) -> AppResult<UserBadge> {
        self.collection.insert_one(&user_badge).await?;
        Ok(user_badge)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<UserBadge>> {
        let earned = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "earned_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(earned)
    }

    async fn find_badge_ids_by_user(&self, user_id: &str) -> AppResult<Vec<String>> {
        let earned = self.find_by_user(user_id).await?;
        Ok(earned.into_iter().map(|ub| ub.badge_id).collect())
    }
}
