use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub exercise_ids: Vec<String>, // authoritative question list
    pub total_points: i32,
    #[serde(default)]
    pub time_limit_minutes: Option<i32>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(id: &str, title: &str, exercise_ids: Vec<String>, total_points: i32) -> Self {
        Quiz {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            exercise_ids,
            total_points,
            time_limit_minutes: None,
            is_active: true,
            created_at: Some(Utc::now()),
        }
    }
}
