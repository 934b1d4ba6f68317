pub mod badge_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod progress_handler;
pub mod quiz_handler;

use actix_web::{error::InternalError, web, HttpResponse};

use crate::{errors::AppError, middleware::get_request_id};

pub use badge_handler::{
    create_badge, evaluate_user_badges, get_user_badges, list_badges, set_badge_active,
};
pub use graphql_handler::{graphiql, graphql_endpoint};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use progress_handler::{get_user_progress, get_user_streak, record_progress};
pub use quiz_handler::{get_quiz_result, get_user_quiz_results, submit_quiz};

/// Malformed JSON bodies become validation errors with the usual error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, req| {
            log::debug!(
                "Rejected JSON body for request {:?}: {}",
                get_request_id(req),
                err
            );
            let app_error = AppError::ValidationError(err.to_string());
            let response = HttpResponse::from_error(app_error);
            InternalError::from_response(err, response).into()
        })
}

/// Registers every REST route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(submit_quiz)
        .service(get_user_quiz_results)
        .service(get_quiz_result)
        .service(record_progress)
        .service(get_user_progress)
        .service(get_user_streak)
        .service(get_user_badges)
        .service(evaluate_user_badges)
        .service(list_badges)
        .service(create_badge)
        .service(set_badge_active);
}
