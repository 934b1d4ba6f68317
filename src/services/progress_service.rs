use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{ProgressUpdate, UserProgress},
        dto::{request::ProgressUpdateRequest, response::EarnedBadgeDto},
    },
    repositories::{LessonRepository, ProgressRepository},
    services::{badge_evaluator::BadgeEvaluatorService, streak_tracker::StreakService},
};

#[derive(Debug, Clone)]
pub struct ProgressOutcome {
    pub progress: UserProgress,
    pub new_badges: Vec<EarnedBadgeDto>,
}

/// Keeps the per-lesson progress aggregate and runs the completion hooks
/// (streak, then badges).
pub struct ProgressService {
    lesson_repository: Arc<dyn LessonRepository>,
    progress_repository: Arc<dyn ProgressRepository>,
    streak_service: Arc<StreakService>,
    badge_evaluator: Arc<BadgeEvaluatorService>,
}

impl ProgressService {
    pub fn new(
        lesson_repository: Arc<dyn LessonRepository>,
        progress_repository: Arc<dyn ProgressRepository>,
        streak_service: Arc<StreakService>,
        badge_evaluator: Arc<BadgeEvaluatorService>,
    ) -> Self {
        Self {
            lesson_repository,
            progress_repository,
            streak_service,
            badge_evaluator,
        }
    }

    pub async fn record_attempt(
        &self,
        user_id: &str,
        lesson_id: &str,
        request: ProgressUpdateRequest,
    ) -> AppResult<ProgressOutcome> {
        request.validate()?;

        self.lesson_repository
            .find_by_id(lesson_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Lesson with id '{}' not found", lesson_id))
            })?;

        let update: ProgressUpdate = request.into();
        let progress = self.upsert(user_id, lesson_id, &update, Utc::now()).await?;

        let new_badges = if update.marks_completed() {
            self.on_lesson_completed(user_id).await
        } else {
            Vec::new()
        };

        Ok(ProgressOutcome {
            progress,
            new_badges,
        })
    }

    pub async fn get_user_progress(&self, user_id: &str) -> AppResult<Vec<UserProgress>> {
        let mut records = self.progress_repository.find_by_user(user_id).await?;
        records.sort_by(|a, b| b.last_attempt_at.cmp(&a.last_attempt_at));
        Ok(records)
    }

    async fn upsert(
        &self,
        user_id: &str,
        lesson_id: &str,
        update: &ProgressUpdate,
        now: DateTime<Utc>,
    ) -> AppResult<UserProgress> {
        let existing = self
            .progress_repository
            .find_by_user_and_lesson(user_id, lesson_id)
            .await?;

        if let Some(mut progress) = existing {
            progress.apply_attempt(update, now);
            return self.progress_repository.update(progress).await;
        }

        let first = UserProgress::first_attempt(user_id, lesson_id, update, now);
        match self.progress_repository.insert(first).await {
            Ok(created) => Ok(created),
            Err(AppError::AlreadyExists(_)) => {
                // Another request created the record first; fold into theirs.
                log::debug!(
                    "Progress for user '{}' lesson '{}' created concurrently",
                    user_id,
                    lesson_id
                );
                let mut progress = self
                    .progress_repository
                    .find_by_user_and_lesson(user_id, lesson_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError(format!(
                            "Progress for user '{}' lesson '{}' vanished after conflict",
                            user_id, lesson_id
                        ))
                    })?;
                progress.apply_attempt(update, now);
                self.progress_repository.update(progress).await
            }
            Err(e) => Err(e),
        }
    }

    /// Neither hook can fail the progress write.
    async fn on_lesson_completed(&self, user_id: &str) -> Vec<EarnedBadgeDto> {
        if let Err(e) = self.streak_service.record_study_day(user_id).await {
            log::warn!("Failed to update streak for user '{}': {}", user_id, e);
        }

        match self.badge_evaluator.evaluate(user_id).await {
            Ok(badges) => badges,
            Err(e) => {
                log::warn!("Failed to evaluate badges for user '{}': {}", user_id, e);
                Vec::new()
            }
        }
    }
}
