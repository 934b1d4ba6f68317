use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog entry, managed by admins.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rarity: BadgeRarity,
    pub condition: BadgeCondition,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BadgeCondition {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub value: f64,
    /// Minutes. Only meaningful for `quiz_score`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    ExercisesCompleted,
    QuizScore,
    LessonsCompleted,
    Streak,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "lowercase")]
pub enum BadgeRarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Badge {
    pub fn new(
        name: &str,
        description: &str,
        icon: &str,
        rarity: BadgeRarity,
        condition: BadgeCondition,
    ) -> Self {
        Badge {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            rarity,
            condition,
            is_active: true,
            created_at: Some(Utc::now()),
        }
    }
}

impl BadgeCondition {
    pub fn new(condition_type: ConditionType, value: f64) -> Self {
        BadgeCondition {
            condition_type,
            value,
            time_limit: None,
        }
    }

    pub fn with_time_limit(mut self, minutes: f64) -> Self {
        self.time_limit = Some(minutes);
        self
    }
}
