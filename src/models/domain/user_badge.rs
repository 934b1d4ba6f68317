use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A badge held by a user. Unique per (user_id, badge_id).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UserBadge {
    pub id: String,
    pub user_id: String,
    pub badge_id: String,
    pub metadata: serde_json::Value,
    pub earned_at: DateTime<Utc>,
}

impl UserBadge {
    pub fn new(user_id: &str, badge_id: &str, metadata: serde_json::Value) -> Self {
        UserBadge {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            badge_id: badge_id.to_string(),
            metadata,
            earned_at: Utc::now(),
        }
    }
}
