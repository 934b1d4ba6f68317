use async_graphql::{InputObject, Json};
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{BadgeCondition, BadgeRarity, ConditionType, ProgressUpdate};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    #[validate(length(min = 1, max = 100))]
    pub exercise_id: String,

    #[serde(default)]
    pub user_answer: Option<serde_json::Value>,
}

/// Body of a quiz submission. A non-list `answers` fails deserialization and
/// surfaces as a validation error before any grading happens.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[validate(nested)]
    pub answers: Vec<SubmittedAnswer>,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub time_spent_seconds: i64,
}

#[derive(Debug, Clone, InputObject)]
pub struct SubmittedAnswerInput {
    pub exercise_id: String,
    pub user_answer: Option<Json<serde_json::Value>>,
}

#[derive(Debug, Clone, InputObject)]
pub struct SubmitQuizInput {
    pub answers: Vec<SubmittedAnswerInput>,
    pub time_spent_seconds: i64,
}

impl From<SubmitQuizInput> for SubmitQuizRequest {
    fn from(input: SubmitQuizInput) -> Self {
        SubmitQuizRequest {
            answers: input
                .answers
                .into_iter()
                .map(|answer| SubmittedAnswer {
                    exercise_id: answer.exercise_id,
                    user_answer: answer.user_answer.map(|json| json.0),
                })
                .collect(),
            time_spent_seconds: input.time_spent_seconds,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateRequest {
    pub completed: Option<bool>,

    // Out-of-range values are clamped rather than rejected.
    pub completion_percentage: Option<i32>,

    pub score: Option<i32>,

    #[validate(range(min = 0, max = 1440))]
    pub time_spent_minutes: Option<i64>,
}

impl From<ProgressUpdateRequest> for ProgressUpdate {
    fn from(request: ProgressUpdateRequest) -> Self {
        ProgressUpdate {
            completed: request.completed,
            completion_percentage: request.completion_percentage,
            score: request.score,
            time_spent_minutes: request.time_spent_minutes,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct BadgeConditionInput {
    #[serde(rename = "type")]
    #[graphql(name = "type")]
    pub condition_type: ConditionType,

    #[validate(range(min = 0.0))]
    pub value: f64,

    #[validate(range(min = 0.0))]
    pub time_limit: Option<f64>,
}

impl From<BadgeConditionInput> for BadgeCondition {
    fn from(input: BadgeConditionInput) -> Self {
        BadgeCondition {
            condition_type: input.condition_type,
            value: input.value,
            time_limit: input.time_limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateBadgeRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 500))]
    #[serde(default)]
    #[graphql(default)]
    pub description: String,

    #[validate(length(min = 1, max = 100))]
    pub icon: String,

    pub rarity: Option<BadgeRarity>,

    #[validate(nested)]
    pub condition: BadgeConditionInput,

    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBadgeActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultQuery {
    pub quiz_id: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl QuizResultQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            offset: self.offset,
            limit: self.limit,
        }
    }
}
