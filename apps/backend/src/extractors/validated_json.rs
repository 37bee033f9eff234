use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Bodies larger than this are rejected before parsing.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// JSON body extractor with problem-details errors.
///
/// Parse failures become a 400 `BAD_REQUEST` with a sanitized message; the
/// serde error itself only reaches debug logs. An empty body is read as
/// `null`, so `ValidatedJson<Option<T>>` makes the whole body optional.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(%trace_id, error = %e, "failed to read request body");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
                b"null"
            } else {
                &body
            };

            let parsed = serde_json::from_slice::<T>(raw).map_err(|e| {
                debug!(
                    %trace_id,
                    category = ?e.classify(),
                    %content_type,
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::bad_request(ErrorCode::BadRequest, describe_json_error(&e))
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

fn describe_json_error(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => "Invalid JSON: missing or mistyped fields".to_string(),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Vote {
        vote: bool,
    }

    async fn extract<T: DeserializeOwned + 'static>(body: &'static str) -> Result<T, AppError> {
        let (req, mut payload) = TestRequest::default()
            .insert_header(("content-type", "application/json"))
            .set_payload(body)
            .to_http_parts();
        ValidatedJson::<T>::from_request(&req, &mut payload)
            .await
            .map(ValidatedJson::into_inner)
    }

    #[actix_web::test]
    async fn parses_body() {
        let vote: Vote = extract(r#"{"vote": true}"#).await.unwrap();
        assert!(vote.vote);
    }

    #[actix_web::test]
    async fn wrong_type_is_bad_request() {
        let err = extract::<Vote>(r#"{"vote": "yes"}"#).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn empty_body_reads_as_none() {
        let vote: Option<Vote> = extract("").await.unwrap();
        assert!(vote.is_none());
        assert!(extract::<Vote>("").await.is_err());
    }

    #[test]
    fn syntax_errors_report_line() {
        let err = serde_json::from_str::<Vote>("{\n\"vote\": }").unwrap_err();
        assert_eq!(describe_json_error(&err), "Invalid JSON at line 2");
    }
}
