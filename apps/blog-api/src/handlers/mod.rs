//! HTTP handlers and route configuration.

mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::resource("/posts")
                .route(web::get().to(posts::list_posts))
                .route(web::post().to(posts::create_post))
                .default_service(web::to(posts::method_not_allowed)),
        )
        .service(web::resource("/posts/").to(posts::missing_id))
        .service(
            web::resource("/posts/{id}")
                .route(web::get().to(posts::get_post))
                .route(web::put().to(posts::update_post))
                .route(web::delete().to(posts::delete_post))
                .default_service(web::to(posts::method_not_allowed)),
        );
}

/// Malformed or mistyped JSON bodies become 400 problem responses.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        AppError::BadRequest(format!("invalid request body: {err}")).into()
    })
}
