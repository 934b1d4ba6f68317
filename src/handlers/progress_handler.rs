use actix_web::{get, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_owner_or_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::ProgressUpdateRequest,
        response::{ProgressUpdateResponse, StreakDto, UserProgressDto},
    },
    services::StreakTracker,
};

#[put("/api/lessons/{lesson_id}/progress")]
async fn record_progress(
    state: web::Data<AppState>,
    lesson_id: web::Path<String>,
    request: web::Json<ProgressUpdateRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .progress_service
        .record_attempt(&auth.0.id, &lesson_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ProgressUpdateResponse {
        progress: outcome.progress.into(),
        new_badges: outcome.new_badges,
    }))
}

#[get("/api/users/{user_id}/progress")]
async fn get_user_progress(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_owner_or_admin(&auth.0, &user_id)?;

    let records = state.progress_service.get_user_progress(&user_id).await?;
    let response: Vec<UserProgressDto> = records.into_iter().map(UserProgressDto::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/users/{user_id}/streak")]
async fn get_user_streak(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_owner_or_admin(&auth.0, &user_id)?;

    let streak = state.streak_service.get_streak(&user_id).await?;
    Ok(HttpResponse::Ok().json(StreakDto::from_state(streak, StreakTracker::today())))
}
