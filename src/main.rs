use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use lumen_server::{
    app_state::AppState,
    auth::IdentityMiddleware,
    config::Config,
    graphql::create_schema,
    handlers::{self, graphiql, graphql_endpoint},
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config.validate_for_production();

    let app_state = AppState::new(config.clone())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let schema = create_schema(app_state.clone());

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    log::info!(
        "Starting HTTP server on {}:{} ({})",
        bind_addr.0,
        bind_addr.1,
        config.app_env
    );
    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        bind_addr.0,
        bind_addr.1
    );

    let allowed_origin = config.cors_allowed_origin.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .allowed_header("x-user-id")
            .allowed_header("x-user-role")
            .expose_headers(vec!["x-request-id"])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(IdentityMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(r#"%a "%r" %s %b %T req_id=%{x-request-id}o"#))
            .wrap(cors)
            .configure(handlers::configure)
            .service(graphql_endpoint)
            .service(graphiql)
    })
    .bind(bind_addr)?
    .run()
    .await
}
