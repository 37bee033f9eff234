use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod games;
pub mod health;

fn query_error(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
}

/// Register every route. Shared by `main.rs` and the integration tests so
/// both exercise the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Games routes: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
}
