use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One graded submission. Created once, never updated.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: i32,       // points earned
    pub total_score: i32, // points available on the quiz
    pub percentage: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub time_spent_seconds: i64,
    pub answers: Vec<GradedAnswer>,
    pub topic_stats: Vec<TopicStat>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GradedAnswer {
    pub exercise_id: String,
    pub user_answer: serde_json::Value,
    pub is_correct: bool,
    pub points: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TopicStat {
    pub topic_id: String,
    pub correct: i32,
    pub total: i32,
}
