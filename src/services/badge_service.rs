use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Badge, BadgeCondition, ConditionType},
        dto::request::CreateBadgeRequest,
    },
    repositories::BadgeRepository,
};

/// Admin management of the badge catalog.
pub struct BadgeService {
    repository: Arc<dyn BadgeRepository>,
}

impl BadgeService {
    pub fn new(repository: Arc<dyn BadgeRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_badge(&self, request: CreateBadgeRequest) -> AppResult<Badge> {
        request.validate()?;

        let condition: BadgeCondition = request.condition.into();
        Self::check_condition(&condition)?;

        let mut badge = Badge::new(
            request.name.trim(),
            &request.description,
            &request.icon,
            request.rarity.unwrap_or_default(),
            condition,
        );
        badge.is_active = request.is_active.unwrap_or(true);

        let created = self.repository.create(badge).await?;
        log::info!("Created badge '{}' ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn list_badges(&self, include_inactive: bool) -> AppResult<Vec<Badge>> {
        let mut badges = if include_inactive {
            self.repository.find_all().await?
        } else {
            self.repository.find_active().await?
        };
        badges.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(badges)
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> AppResult<Badge> {
        let badge = self.repository.set_active(id, is_active).await?;
        log::info!("Badge '{}' is_active set to {}", badge.id, is_active);
        Ok(badge)
    }

    fn check_condition(condition: &BadgeCondition) -> AppResult<()> {
        if !condition.value.is_finite() {
            return Err(AppError::ValidationError(
                "Condition value must be a finite number".to_string(),
            ));
        }

        match condition.condition_type {
            ConditionType::QuizScore if condition.value > 100.0 => Err(AppError::ValidationError(
                "Quiz score threshold must be between 0 and 100".to_string(),
            )),
            ConditionType::ExercisesCompleted
            | ConditionType::LessonsCompleted
            | ConditionType::Streak
                if condition.value < 1.0 =>
            {
                Err(AppError::ValidationError(
                    "Count thresholds must be at least 1".to_string(),
                ))
            }
            _ if condition.time_limit.is_some()
                && condition.condition_type != ConditionType::QuizScore =>
            {
                Err(AppError::ValidationError(
                    "Only quiz_score conditions accept a time limit".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::BadgeRarity;
    use crate::models::dto::request::BadgeConditionInput;
    use crate::repositories::badge_repository::MockBadgeRepository;

    fn request(condition_type: ConditionType, value: f64) -> CreateBadgeRequest {
        CreateBadgeRequest {
            name: "Scholar".to_string(),
            description: "Keep learning".to_string(),
            icon: "📚".to_string(),
            rarity: Some(BadgeRarity::Rare),
            condition: BadgeConditionInput {
                condition_type,
                value,
                time_limit: None,
            },
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_create_badge_defaults_to_active() {
        let mut repo = MockBadgeRepository::new();
        repo.expect_create().times(1).returning(Ok);

        let service = BadgeService::new(Arc::new(repo));
        let badge = service
            .create_badge(request(ConditionType::LessonsCompleted, 5.0))
            .await
            .expect("create should work");

        assert!(badge.is_active);
        assert_eq!(badge.rarity, BadgeRarity::Rare);
        assert_eq!(badge.condition.value, 5.0);
    }

    #[tokio::test]
    async fn test_create_badge_rejects_impossible_quiz_score() {
        let mut repo = MockBadgeRepository::new();
        repo.expect_create().never();

        let service = BadgeService::new(Arc::new(repo));
        let result = service
            .create_badge(request(ConditionType::QuizScore, 150.0))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_create_badge_rejects_zero_streak() {
        let mut repo = MockBadgeRepository::new();
        repo.expect_create().never();

        let service = BadgeService::new(Arc::new(repo));
        let result = service.create_badge(request(ConditionType::Streak, 0.0)).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_time_limit_only_for_quiz_score() {
        let mut repo = MockBadgeRepository::new();
        repo.expect_create().never();

        let mut invalid = request(ConditionType::Streak, 3.0);
        invalid.condition.time_limit = Some(10.0);

        let service = BadgeService::new(Arc::new(repo));
        let result = service.create_badge(invalid).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_set_active_on_missing_badge() {
        let mut repo = MockBadgeRepository::new();
        repo.expect_set_active()
            .returning(|id, _| Err(AppError::NotFound(format!("Badge with id '{}' not found", id))));

        let service = BadgeService::new(Arc::new(repo));
        let result = service.set_active("missing", false).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
