//! Response contract helpers for backend testing
//!
//! Errors come back as Problem Details, successes wrapped in the
//! `{ status, msg, data }` envelope. These helpers check both shapes without
//! depending on backend types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Local mirror of the backend's ProblemDetails.
#[derive(Debug, Deserialize, Serialize)]
struct ProblemDetailsLike {
    #[serde(rename = "type")]
    type_: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
    trace_id: String,
}

/// Local mirror of the backend's success envelope.
#[derive(Debug, Deserialize)]
pub struct EnvelopeLike<T> {
    pub status: u16,
    pub msg: String,
    pub data: T,
}

/// Assert that response parts conform to the error contract:
/// status, `x-trace-id` parity with the body, code and optional detail.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) {
    assert_eq!(status, expected_status);

    let problem: ProblemDetailsLike = serde_json::from_slice(body_bytes)
        .expect("Response body should be valid ProblemDetails JSON");

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert_eq!(
        problem.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(problem.type_.ends_with(expected_code));

    if let Some(expected_detail) = expected_detail_contains {
        assert!(
            problem.detail.contains(expected_detail),
            "Expected detail to contain '{}', but got '{}'",
            expected_detail,
            problem.detail
        );
    }
}

/// Same as [`assert_problem_details_from_parts`] for a test service response.
pub async fn assert_problem_details_from_service_response(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        expected_detail_contains,
    );
}

/// Assert a success status and decode the envelope's `data`.
pub async fn read_envelope<T: DeserializeOwned>(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
) -> T {
    assert_eq!(resp.status(), expected_status);
    let body = actix_web::test::read_body(resp).await;
    let envelope: EnvelopeLike<T> =
        serde_json::from_slice(&body).expect("Response body should be a success envelope");
    assert_eq!(envelope.status, expected_status.as_u16());
    envelope.data
}
