use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::answer::CorrectAnswer;

/// Exercise as owned by content management. Read-only here.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Exercise {
    pub id: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    pub difficulty: Difficulty,
    pub points: i32, // >= 1, enforced by content management
    pub lesson_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseType {
    MultipleChoice,
    FillBlank,
    Essay,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[cfg(test)]
impl Exercise {
    pub fn test_exercise(id: &str, lesson_id: &str, answer: CorrectAnswer, points: i32) -> Self {
        Exercise {
            id: id.to_string(),
            exercise_type: ExerciseType::FillBlank,
            question: format!("Question {}", id),
            options: Vec::new(),
            correct_answer: answer,
            explanation: None,
            hint: None,
            difficulty: Difficulty::Easy,
            points,
            lesson_id: lesson_id.to_string(),
            created_at: None,
        }
    }
}
