use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Player credentials travel as plain request headers.
const PLAYER_HEADER: &str = "player";
const PASSWORD_HEADER: &str = "password";

fn allowed_origins(raw: &str) -> Vec<String> {
    let parsed: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if parsed.is_empty() {
        vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ]
    } else {
        parsed
    }
}

/// CORS for the game API.
///
/// Origins come from the comma-separated `CORS_ALLOWED_ORIGINS`; malformed
/// entries are dropped and an empty list falls back to localhost.
pub fn cors_middleware() -> Cors {
    let origins = allowed_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "HEAD", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::IF_NONE_MATCH,
            header::HeaderName::from_static(PLAYER_HEADER),
            header::HeaderName::from_static(PASSWORD_HEADER),
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::ETAG,
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }
    cors
}

#[cfg(test)]
mod tests {
    use super::allowed_origins;

    #[test]
    fn falls_back_to_localhost() {
        assert_eq!(allowed_origins("").len(), 2);
        assert_eq!(allowed_origins(" null , ftp://x ").len(), 2);
    }

    #[test]
    fn keeps_valid_origins() {
        let origins = allowed_origins("https://play.example.org, http://localhost:5173,");
        assert_eq!(
            origins,
            vec!["https://play.example.org", "http://localhost:5173"]
        );
    }
}
