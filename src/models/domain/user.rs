use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::streak::StreakState;

/// Learner as seen by the progress engine. Account data lives elsewhere;
/// this service only reads the id and owns the embedded streak.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub streak: StreakState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: &str, username: &str) -> Self {
        User {
            id: id.to_string(),
            username: username.to_string(),
            streak: StreakState::default(),
            created_at: Some(Utc::now()),
        }
    }
}
