use actix_web::web;
use crate::web::handlers;

pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .service(
            web::scope("/v1")
                .route("/chat/completions", web::post().to(handlers::chat_completions))
        )
        .route("/healthz", web::get().to(handlers::health_check));
}
