use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_owner_or_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{QuizResultQuery, SubmitQuizRequest},
        response::{PaginatedResponseQuizResult, PaginationMetadata, QuizResultDto, QuizSubmissionResponse},
    },
};

#[post("/api/quizzes/{quiz_id}/submissions")]
async fn submit_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .quiz_grader_service
        .submit(&quiz_id, &auth.0.id, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(QuizSubmissionResponse {
        result: outcome.result.into(),
        new_badges: outcome.new_badges,
    }))
}

#[get("/api/users/{user_id}/quiz-results")]
async fn get_user_quiz_results(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    query: web::Query<QuizResultQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_owner_or_admin(&auth.0, &user_id)?;

    let query = query.into_inner();
    let pagination = query.pagination();
    let (results, total) = state
        .quiz_grader_service
        .get_user_results(&user_id, query.quiz_id, pagination.offset(), pagination.limit())
        .await?;

    Ok(HttpResponse::Ok().json(PaginatedResponseQuizResult {
        data: results.into_iter().map(QuizResultDto::from).collect(),
        pagination: PaginationMetadata {
            offset: pagination.offset(),
            limit: pagination.limit(),
            total,
        },
    }))
}

#[get("/api/quiz-results/{id}")]
async fn get_quiz_result(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state.quiz_grader_service.get_result(&id).await?;
    require_owner_or_admin(&auth.0, &result.user_id)?;

    Ok(HttpResponse::Ok().json(QuizResultDto::from(result)))
}
