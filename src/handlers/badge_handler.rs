use actix_web::{get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, require_owner_or_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{CreateBadgeRequest, SetBadgeActiveRequest},
        response::BadgeDto,
    },
};

#[get("/api/users/{user_id}/badges")]
async fn get_user_badges(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_owner_or_admin(&auth.0, &user_id)?;

    let badges = state.badge_evaluator.earned_badges(&user_id).await?;
    Ok(HttpResponse::Ok().json(badges))
}

#[post("/api/users/{user_id}/badges/evaluate")]
async fn evaluate_user_badges(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_owner_or_admin(&auth.0, &user_id)?;

    let new_badges = state.badge_evaluator.evaluate(&user_id).await?;
    Ok(HttpResponse::Ok().json(new_badges))
}

#[get("/api/badges")]
async fn list_badges(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let badges = state.badge_service.list_badges(auth.0.is_admin()).await?;
    let response: Vec<BadgeDto> = badges.into_iter().map(BadgeDto::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/badges")]
async fn create_badge(
    state: web::Data<AppState>,
    request: web::Json<CreateBadgeRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let badge = state.badge_service.create_badge(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(BadgeDto::from(badge)))
}

#[put("/api/badges/{id}/active")]
async fn set_badge_active(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SetBadgeActiveRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let badge = state
        .badge_service
        .set_active(&id, request.into_inner().is_active)
        .await?;
    Ok(HttpResponse::Ok().json(BadgeDto::from(badge)))
}
