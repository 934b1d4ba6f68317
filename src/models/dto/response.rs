use async_graphql::{ComplexObject, Json, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::domain::{
    Badge, BadgeCondition, BadgeRarity, ConditionType, GradedAnswer, QuizResult, StreakState,
    TopicStat, UserBadge, UserProgress,
};

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct GradedAnswerDto {
    pub exercise_id: String,
    #[graphql(skip)]
    pub user_answer: serde_json::Value,
    pub is_correct: bool,
    pub points: i32,
}

#[ComplexObject]
impl GradedAnswerDto {
    async fn user_answer(&self) -> Json<serde_json::Value> {
        Json(self.user_answer.clone())
    }
}

impl From<GradedAnswer> for GradedAnswerDto {
    fn from(answer: GradedAnswer) -> Self {
        GradedAnswerDto {
            exercise_id: answer.exercise_id,
            user_answer: answer.user_answer,
            is_correct: answer.is_correct,
            points: answer.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct TopicStatDto {
    pub topic_id: String,
    pub correct: i32,
    pub total: i32,
}

impl From<TopicStat> for TopicStatDto {
    fn from(stat: TopicStat) -> Self {
        TopicStatDto {
            topic_id: stat.topic_id,
            correct: stat.correct,
            total: stat.total,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultDto {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: i32,
    pub total_score: i32,
    pub percentage: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub time_spent_seconds: i64,
    pub answers: Vec<GradedAnswerDto>,
    pub topic_stats: Vec<TopicStatDto>,
    pub completed_at: DateTime<Utc>,
}

impl From<QuizResult> for QuizResultDto {
    fn from(result: QuizResult) -> Self {
        QuizResultDto {
            id: result.id,
            user_id: result.user_id,
            quiz_id: result.quiz_id,
            score: result.score,
            total_score: result.total_score,
            percentage: result.percentage,
            total_questions: result.total_questions,
            correct_answers: result.correct_answers,
            wrong_answers: result.wrong_answers,
            time_spent_seconds: result.time_spent_seconds,
            answers: result.answers.into_iter().map(GradedAnswerDto::from).collect(),
            topic_stats: result.topic_stats.into_iter().map(TopicStatDto::from).collect(),
            completed_at: result.completed_at,
        }
    }
}

/// A badge as shown to the user who holds it.
#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct EarnedBadgeDto {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub rarity: BadgeRarity,
    #[graphql(skip)]
    pub metadata: serde_json::Value,
    pub earned_at: DateTime<Utc>,
}

#[ComplexObject]
impl EarnedBadgeDto {
    async fn metadata(&self) -> Json<serde_json::Value> {
        Json(self.metadata.clone())
    }
}

impl EarnedBadgeDto {
    pub fn from_award(badge: &Badge, award: UserBadge) -> Self {
        EarnedBadgeDto {
            id: badge.id.clone(),
            name: badge.name.clone(),
            icon: badge.icon.clone(),
            description: badge.description.clone(),
            rarity: badge.rarity,
            metadata: award.metadata,
            earned_at: award.earned_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmissionResponse {
    pub result: QuizResultDto,
    pub new_badges: Vec<EarnedBadgeDto>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct UserProgressDto {
    pub id: String,
    pub user_id: String,
    pub lesson_id: String,
    pub completed: bool,
    pub completion_percentage: i32,
    pub best_score: i32,
    pub attempts: i32,
    pub time_spent_minutes: i64,
    pub last_attempt_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<UserProgress> for UserProgressDto {
    fn from(progress: UserProgress) -> Self {
        UserProgressDto {
            id: progress.id,
            user_id: progress.user_id,
            lesson_id: progress.lesson_id,
            completed: progress.completed,
            completion_percentage: progress.completion_percentage,
            best_score: progress.best_score,
            attempts: progress.attempts,
            time_spent_minutes: progress.time_spent_minutes,
            last_attempt_at: progress.last_attempt_at,
            completed_at: progress.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateResponse {
    pub progress: UserProgressDto,
    pub new_badges: Vec<EarnedBadgeDto>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct StreakDto {
    pub current: u32,
    pub last_study_date: Option<NaiveDate>,
    pub studied_today: bool,
}

impl StreakDto {
    pub fn from_state(state: StreakState, today: NaiveDate) -> Self {
        StreakDto {
            current: state.current,
            last_study_date: state.last_study_date,
            studied_today: state.studied_on(today),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct BadgeConditionDto {
    #[serde(rename = "type")]
    #[graphql(name = "type")]
    pub condition_type: ConditionType,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<f64>,
}

impl From<BadgeCondition> for BadgeConditionDto {
    fn from(condition: BadgeCondition) -> Self {
        BadgeConditionDto {
            condition_type: condition.condition_type,
            value: condition.value,
            time_limit: condition.time_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rarity: BadgeRarity,
    pub condition: BadgeConditionDto,
    pub is_active: bool,
}

impl From<Badge> for BadgeDto {
    fn from(badge: Badge) -> Self {
        BadgeDto {
            id: badge.id,
            name: badge.name,
            description: badge.description,
            icon: badge.icon,
            rarity: badge.rarity,
            condition: badge.condition.into(),
            is_active: badge.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PaginationMetadata {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PaginatedResponseQuizResult {
    pub data: Vec<QuizResultDto>,
    pub pagination: PaginationMetadata,
}
