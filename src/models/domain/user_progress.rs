use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate of every practice attempt one user made on one lesson.
/// Unique per (user_id, lesson_id).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProgress {
    pub id: String,
    pub user_id: String,
    pub lesson_id: String,
    pub completed: bool,
    pub completion_percentage: i32,
    pub best_score: i32,
    pub attempts: i32,
    pub time_spent_minutes: i64,
    pub last_attempt_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Fields reported by a single practice attempt. Absent fields leave the
/// aggregate untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub completed: Option<bool>,
    pub completion_percentage: Option<i32>,
    pub score: Option<i32>,
    pub time_spent_minutes: Option<i64>,
}

impl ProgressUpdate {
    pub fn marks_completed(&self) -> bool {
        self.completed == Some(true)
    }
}

fn clamp_percentage(value: i32) -> i32 {
    value.clamp(0, 100)
}

impl UserProgress {
    /// Record for the first attempt on a lesson.
    pub fn first_attempt(
        user_id: &str,
        lesson_id: &str,
        update: &ProgressUpdate,
        now: DateTime<Utc>,
    ) -> Self {
        let completed = update.marks_completed();

        UserProgress {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            lesson_id: lesson_id.to_string(),
            completed,
            completion_percentage: clamp_percentage(update.completion_percentage.unwrap_or(0)),
            best_score: update.score.unwrap_or(0),
            attempts: 1,
            time_spent_minutes: update.time_spent_minutes.unwrap_or(0),
            last_attempt_at: now,
            completed_at: completed.then_some(now),
        }
    }

    /// Folds one more attempt into the aggregate.
    ///
    /// Completion is sticky and `completed_at` is only ever set once.
    pub fn apply_attempt(&mut self, update: &ProgressUpdate, now: DateTime<Utc>) {
        if let Some(percentage) = update.completion_percentage {
            self.completion_percentage = clamp_percentage(percentage);
        }
        if let Some(score) = update.score {
            self.best_score = self.best_score.max(score);
        }
        if let Some(minutes) = update.time_spent_minutes {
            self.time_spent_minutes += minutes;
        }
        if update.marks_completed() {
            self.completed = true;
            if self.completed_at.is_none() {
                self.completed_at = Some(now);
            }
        }

        self.attempts += 1;
        self.last_attempt_at = now;
    }
}
