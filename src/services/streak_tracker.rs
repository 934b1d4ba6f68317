use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::{
    errors::{AppError, AppResult},
    models::domain::StreakState,
    repositories::UserRepository,
};

pub struct StreakTracker;

impl StreakTracker {
    /// Next streak state after the user completes a lesson on `today`.
    pub fn advance(state: StreakState, today: NaiveDate) -> StreakState {
        let current = match state.last_study_date {
            None => 1,
            Some(last) if last == today => state.current.max(1),
            Some(last) if today.pred_opt() == Some(last) => state.current.saturating_add(1),
            // Gap of two or more days, or a date ahead of the server clock.
            Some(_) => 1,
        };

        StreakState {
            current,
            last_study_date: Some(today),
        }
    }

    /// Server-local calendar date. No per-user timezone handling.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

pub struct StreakService {
    user_repository: Arc<dyn UserRepository>,
}

impl StreakService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn get_streak(&self, user_id: &str) -> AppResult<StreakState> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))?;

        Ok(user.streak)
    }

    pub async fn record_study_day(&self, user_id: &str) -> AppResult<StreakState> {
        self.record_study_day_on(user_id, StreakTracker::today()).await
    }

    pub async fn record_study_day_on(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> AppResult<StreakState> {
        let previous = self.get_streak(user_id).await?;
        let next = StreakTracker::advance(previous, today);

        self.user_repository.update_streak(user_id, next).await?;

        log::debug!(
            "Streak for user '{}' moved from {} to {}",
            user_id,
            previous.current,
            next.current
        );
        Ok(next)
    }
}
