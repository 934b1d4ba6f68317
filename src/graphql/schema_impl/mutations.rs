use async_graphql::{Context, Object, Result, ResultExt};

use crate::{
    app_state::AppState,
    auth::{extract_user_from_context, require_admin},
    models::dto::{
        request::{CreateBadgeRequest, ProgressUpdateRequest, SubmitQuizInput},
        response::{BadgeDto, EarnedBadgeDto, ProgressUpdateResponse, QuizSubmissionResponse},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn submit_quiz(
        &self,
        ctx: &Context<'_>,
        quiz_id: String,
        input: SubmitQuizInput,
    ) -> Result<QuizSubmissionResponse> {
        let state = ctx.data::<AppState>()?;
        let user = extract_user_from_context(ctx).extend()?;

        let outcome = state
            .quiz_grader_service
            .submit(&quiz_id, &user.id, input.into())
            .await
            .extend()?;

        Ok(QuizSubmissionResponse {
            result: outcome.result.into(),
            new_badges: outcome.new_badges,
        })
    }

    async fn record_progress(
        &self,
        ctx: &Context<'_>,
        lesson_id: String,
        input: ProgressUpdateRequest,
    ) -> Result<ProgressUpdateResponse> {
        let state = ctx.data::<AppState>()?;
        let user = extract_user_from_context(ctx).extend()?;

        let outcome = state
            .progress_service
            .record_attempt(&user.id, &lesson_id, input)
            .await
            .extend()?;

        Ok(ProgressUpdateResponse {
            progress: outcome.progress.into(),
            new_badges: outcome.new_badges,
        })
    }

    async fn evaluate_badges(&self, ctx: &Context<'_>) -> Result<Vec<EarnedBadgeDto>> {
        let state = ctx.data::<AppState>()?;
        let user = extract_user_from_context(ctx).extend()?;

        state.badge_evaluator.evaluate(&user.id).await.extend()
    }

    async fn create_badge(&self, ctx: &Context<'_>, input: CreateBadgeRequest) -> Result<BadgeDto> {
        let state = ctx.data::<AppState>()?;
        let user = extract_user_from_context(ctx).extend()?;
        require_admin(&user).extend()?;

        let badge = state.badge_service.create_badge(input).await.extend()?;
        Ok(badge.into())
    }

    async fn set_badge_active(
        &self,
        ctx: &Context<'_>,
        id: String,
        is_active: bool,
    ) -> Result<BadgeDto> {
        let state = ctx.data::<AppState>()?;
        let user = extract_user_from_context(ctx).extend()?;
        require_admin(&user).extend()?;

        let badge = state.badge_service.set_active(&id, is_active).await.extend()?;
        Ok(badge.into())
    }
}
