use async_graphql::{Context, Object, Result, ResultExt};

use crate::{
    app_state::AppState,
    auth::extract_user_from_context,
    models::dto::{
        request::PaginationParams,
        response::{
            BadgeDto, EarnedBadgeDto, PaginatedResponseQuizResult, PaginationMetadata,
            QuizResultDto, StreakDto, UserProgressDto,
        },
    },
    services::StreakTracker,
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn my_progress(&self, ctx: &Context<'_>) -> Result<Vec<UserProgressDto>> {
        let state = ctx.data::<AppState>()?;
        let user = extract_user_from_context(ctx).extend()?;

        let records = state
            .progress_service
            .get_user_progress(&user.id)
            .await
            .extend()?;
        Ok(records.into_iter().map(UserProgressDto::from).collect())
    }

    async fn my_streak(&self, ctx: &Context<'_>) -> Result<StreakDto> {
        let state = ctx.data::<AppState>()?;
        let user = extract_user_from_context(ctx).extend()?;

        let streak = state.streak_service.get_streak(&user.id).await.extend()?;
        Ok(StreakDto::from_state(streak, StreakTracker::today()))
    }

    async fn my_badges(&self, ctx: &Context<'_>) -> Result<Vec<EarnedBadgeDto>> {
        let state = ctx.data::<AppState>()?;
        let user = extract_user_from_context(ctx).extend()?;

        state.badge_evaluator.earned_badges(&user.id).await.extend()
    }

    async fn my_quiz_results(
        &self,
        ctx: &Context<'_>,
        quiz_id: Option<String>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<PaginatedResponseQuizResult> {
        let state = ctx.data::<AppState>()?;
        let user = extract_user_from_context(ctx).extend()?;

        let pagination = PaginationParams { offset, limit };
        let (results, total) = state
            .quiz_grader_service
            .get_user_results(&user.id, quiz_id, pagination.offset(), pagination.limit())
            .await
            .extend()?;

        Ok(PaginatedResponseQuizResult {
            data: results.into_iter().map(QuizResultDto::from).collect(),
            pagination: PaginationMetadata {
                offset: pagination.offset(),
                limit: pagination.limit(),
                total,
            },
        })
    }

    /// Active badges; admins also see inactive ones.
    async fn badges(&self, ctx: &Context<'_>) -> Result<Vec<BadgeDto>> {
        let state = ctx.data::<AppState>()?;
        let user = extract_user_from_context(ctx).extend()?;

        let badges = state
            .badge_service
            .list_badges(user.is_admin())
            .await
            .extend()?;
        Ok(badges.into_iter().map(BadgeDto::from).collect())
    }
}
