use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{Local, NaiveDate};
use serde_json::{json, Value};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Badge, BadgeCondition, ConditionType, QuizResult, UserBadge, UserProgress},
        dto::response::EarnedBadgeDto,
    },
    repositories::{BadgeRepository, ProgressRepository, QuizResultRepository, UserBadgeRepository},
};

/// What the condition evaluators read about a user. Parts no candidate badge
/// needs are left empty.
#[derive(Debug, Default, Clone)]
pub struct UserHistory {
    pub completed_count: i64,
    pub quiz_results: Vec<QuizResult>,
    /// Newest `last_attempt_at` first.
    pub recent_progress: Vec<UserProgress>,
}

/// Returns the award metadata when the condition holds.
pub type ConditionEvaluator = fn(&BadgeCondition, &UserHistory) -> Option<Value>;

pub fn evaluator_for(condition_type: ConditionType) -> ConditionEvaluator {
    match condition_type {
        // Both count completed lesson progress records.
        ConditionType::ExercisesCompleted | ConditionType::LessonsCompleted => completed_count_met,
        ConditionType::QuizScore => quiz_score_met,
        ConditionType::Streak => study_days_met,
    }
}

fn completed_count_met(condition: &BadgeCondition, history: &UserHistory) -> Option<Value> {
    let completed = history.completed_count;
    (completed as f64 >= condition.value).then(|| json!({ "completed": completed }))
}

fn quiz_score_met(condition: &BadgeCondition, history: &UserHistory) -> Option<Value> {
    let time_limit_seconds = condition.time_limit.map(|minutes| minutes * 60.0);

    let qualifying: Vec<&QuizResult> = history
        .quiz_results
        .iter()
        .filter(|result| result.percentage as f64 >= condition.value)
        .filter(|result| match time_limit_seconds {
            Some(limit) => result.time_spent_seconds as f64 <= limit,
            None => true,
        })
        .collect();

    let max_percentage = qualifying.iter().map(|result| result.percentage).max()?;

    Some(json!({
        "qualifying_results": qualifying.len(),
        "max_percentage": max_percentage,
    }))
}

/// Approximates a streak by counting distinct local days among the most
/// recently attempted lessons.
fn study_days_met(condition: &BadgeCondition, history: &UserHistory) -> Option<Value> {
    let window = streak_window(condition);

    let distinct_days: HashSet<NaiveDate> = history
        .recent_progress
        .iter()
        .take(window)
        .map(|progress| progress.last_attempt_at.with_timezone(&Local).date_naive())
        .collect();

    let days = distinct_days.len();
    (days as f64 >= condition.value).then(|| json!({ "distinct_days": days }))
}

fn streak_window(condition: &BadgeCondition) -> usize {
    if condition.value.is_finite() && condition.value > 0.0 {
        condition.value.ceil() as usize
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AwardOutcome {
    Awarded(UserBadge),
    AlreadyAwarded,
}

pub struct BadgeEvaluatorService {
    badge_repository: Arc<dyn BadgeRepository>,
    user_badge_repository: Arc<dyn UserBadgeRepository>,
    progress_repository: Arc<dyn ProgressRepository>,
    quiz_result_repository: Arc<dyn QuizResultRepository>,
}

impl BadgeEvaluatorService {
    pub fn new(
        badge_repository: Arc<dyn BadgeRepository>,
        user_badge_repository: Arc<dyn UserBadgeRepository>,
        progress_repository: Arc<dyn ProgressRepository>,
        quiz_result_repository: Arc<dyn QuizResultRepository>,
    ) -> Self {
        Self {
            badge_repository,
            user_badge_repository,
            progress_repository,
            quiz_result_repository,
        }
    }

    /// Awards every active badge the user now qualifies for and returns only
    /// the badges created by this call. Running it again is a no-op.
    pub async fn evaluate(&self, user_id: &str) -> AppResult<Vec<EarnedBadgeDto>> {
        let active = self.badge_repository.find_active().await?;
        let earned: HashSet<String> = self
            .user_badge_repository
            .find_badge_ids_by_user(user_id)
            .await?
            .into_iter()
            .collect();

        let candidates: Vec<Badge> = active
            .into_iter()
            .filter(|badge| !earned.contains(&badge.id))
            .collect();

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let history = self.load_history(user_id, &candidates).await?;
        let mut newly_earned = Vec::new();

        for badge in &candidates {
            let evaluate = evaluator_for(badge.condition.condition_type);
            let Some(metadata) = evaluate(&badge.condition, &history) else {
                continue;
            };

            match self.award(user_id, badge, metadata).await {
                Ok(AwardOutcome::Awarded(user_badge)) => {
                    log::info!("User '{}' earned badge '{}'", user_id, badge.name);
                    newly_earned.push(EarnedBadgeDto::from_award(badge, user_badge));
                }
                Ok(AwardOutcome::AlreadyAwarded) => {}
                Err(e) => {
                    log::warn!(
                        "Failed to award badge '{}' to user '{}': {}",
                        badge.id,
                        user_id,
                        e
                    );
                }
            }
        }

        Ok(newly_earned)
    }

    /// Creates the award record. A concurrent or repeated award of the same
    /// badge is reported as `AlreadyAwarded`.
    pub async fn award(
        &self,
        user_id: &str,
        badge: &Badge,
        metadata: Value,
    ) -> AppResult<AwardOutcome> {
        let user_badge = UserBadge::new(user_id, &badge.id, metadata);

        match self.user_badge_repository.create(user_badge).await {
            Ok(created) => Ok(AwardOutcome::Awarded(created)),
            Err(AppError::AlreadyExists(_)) => {
                log::debug!(
                    "Badge '{}' already awarded to user '{}'",
                    badge.id,
                    user_id
                );
                Ok(AwardOutcome::AlreadyAwarded)
            }
            Err(e) => Err(e),
        }
    }

    /// Earned badges joined with their catalog entries, newest first.
    pub async fn earned_badges(&self, user_id: &str) -> AppResult<Vec<EarnedBadgeDto>> {
        let mut awards = self.user_badge_repository.find_by_user(user_id).await?;
        awards.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));

        let catalog: HashMap<String, Badge> = self
            .badge_repository
            .find_all()
            .await?
            .into_iter()
            .map(|badge| (badge.id.clone(), badge))
            .collect();

        let earned = awards
            .into_iter()
            .filter_map(|award| match catalog.get(&award.badge_id) {
                Some(badge) => Some(EarnedBadgeDto::from_award(badge, award)),
                None => {
                    log::warn!(
                        "User '{}' holds badge '{}' missing from the catalog",
                        user_id,
                        award.badge_id
                    );
                    None
                }
            })
            .collect();

        Ok(earned)
    }

    async fn load_history(&self, user_id: &str, candidates: &[Badge]) -> AppResult<UserHistory> {
        let mut history = UserHistory::default();

        let needs = |wanted: &[ConditionType]| {
            candidates
                .iter()
                .any(|badge| wanted.contains(&badge.condition.condition_type))
        };

        if needs(&[ConditionType::ExercisesCompleted, ConditionType::LessonsCompleted]) {
            history.completed_count = self.progress_repository.count_completed(user_id).await?;
        }

        if needs(&[ConditionType::QuizScore]) {
            history.quiz_results = self.quiz_result_repository.find_by_user(user_id).await?;
        }

        let window = candidates
            .iter()
            .filter(|badge| badge.condition.condition_type == ConditionType::Streak)
            .map(|badge| streak_window(&badge.condition))
            .max();

        if let Some(window) = window.filter(|w| *w > 0) {
            history.recent_progress = self.progress_repository.find_recent(user_id, window).await?;
        }

        Ok(history)
    }
}
