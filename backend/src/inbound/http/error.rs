//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix turn
//! a failure into the same `{success: false, message}` envelope the route
//! proxy produces.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::debug;

use crate::domain::{Envelope, Error, ErrorCode};

/// Message for requests that match no proxied route.
pub const UNKNOWN_ROUTE_MESSAGE: &str = "요청한 경로를 찾을 수 없습니다.";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        // Proxy failures are reported as 500 whatever their class.
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Envelope::<()>::failure(self.message()))
    }
}

/// Fallback service for paths outside the route table.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    debug!(method = %req.method(), path = req.path(), "no proxied route matched");
    Error::not_found(UNKNOWN_ROUTE_MESSAGE).error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(Error::validation("bad"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(Error::transport("down"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(Error::application("nope"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(Error::unexpected("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), status);
    }

    #[actix_web::test]
    async fn error_response_is_failure_envelope() {
        let error = Error::unexpected("boom").with_details(json!({"secret": "x"}));
        let response = ResponseError::error_response(&error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.expect("read body");
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value, json!({"success": false, "message": "boom"}));
    }

    #[actix_web::test]
    async fn unknown_route_is_not_found_envelope() {
        let req = actix_web::test::TestRequest::get()
            .uri("/api/unknown")
            .to_http_request();
        let response = not_found(req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.expect("read body");
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some(UNKNOWN_ROUTE_MESSAGE)
        );
    }
}
