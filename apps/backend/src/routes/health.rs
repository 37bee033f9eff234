use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<String>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let mut response = HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        store: app_state.store_label(),
        db: None,
        db_error: None,
        migrations: None,
        time,
    };

    if let Some(db) = app_state.db() {
        let ping = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
        match db.query_one(ping).await {
            Ok(_) => {
                response.db = Some("ok");
                response.migrations = Some(match get_latest_migration_version(db).await {
                    Ok(Some(version)) => version,
                    Ok(None) => "no_migrations".to_string(),
                    Err(_) => "unknown".to_string(),
                });
            }
            Err(e) => {
                response.db = Some("error");
                response.db_error = Some(format!("DB query failed: {e}"));
            }
        }
    }

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
