#[cfg(test)]
pub mod fixtures {
    use chrono::{DateTime, Utc};

    use crate::models::domain::{
        Badge, BadgeCondition, BadgeRarity, ConditionType, ProgressUpdate, QuizResult,
        UserProgress,
    };

    /// An active common badge with the given rule.
    pub fn badge(name: &str, condition_type: ConditionType, value: f64) -> Badge {
        Badge::new(
            name,
            &format!("{} badge", name),
            "🏅",
            BadgeRarity::Common,
            BadgeCondition::new(condition_type, value),
        )
    }

    /// A finished lesson, last attempted at `at`.
    pub fn completed_progress(user_id: &str, lesson_id: &str, at: DateTime<Utc>) -> UserProgress {
        let update = ProgressUpdate {
            completed: Some(true),
            completion_percentage: Some(100),
            ..Default::default()
        };
        UserProgress::first_attempt(user_id, lesson_id, &update, at)
    }

    /// A stored quiz result carrying only the fields badge rules read.
    pub fn quiz_result(user_id: &str, percentage: i32, time_spent_seconds: i64) -> QuizResult {
        QuizResult {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: "quiz-1".to_string(),
            score: percentage,
            total_score: 100,
            percentage,
            total_questions: 0,
            correct_answers: 0,
            wrong_answers: 0,
            time_spent_seconds,
            answers: vec![],
            topic_stats: vec![],
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::ConditionType;
    use chrono::Utc;

    #[test]
    fn test_fixture_badge_is_active() {
        let badge = badge("Starter", ConditionType::LessonsCompleted, 1.0);
        assert!(badge.is_active);
        assert_eq!(badge.condition.condition_type, ConditionType::LessonsCompleted);
    }

    #[test]
    fn test_fixture_progress_is_completed() {
        let now = Utc::now();
        let progress = completed_progress("u1", "l1", now);
        assert!(progress.completed);
        assert_eq!(progress.completed_at, Some(now));
    }
}
