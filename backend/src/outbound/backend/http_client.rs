//! Reqwest-backed backend API adapter.
//!
//! This adapter owns transport details only: method and body encoding (raw
//! multipart passthrough or a reqwest form built from structured fields), the
//! forwarded `Authorization` header, the optional timeout, HTTP error mapping,
//! and decoding the response envelope. Route selection and message handling
//! stay in the route proxy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{BackendApi, BackendApiError, BackendBody, BackendRequest};
use crate::domain::{Envelope, HttpMethod};
use crate::outbound::multipart::multipart_form;

const USER_AGENT: &str = concat!("oncare-gateway/", env!("CARGO_PKG_VERSION"));

/// Backend adapter performing one HTTP request per call.
#[derive(Clone)]
pub struct BackendHttpClient {
    client: Client,
}

impl BackendHttpClient {
    /// Build an adapter. Calls never time out unless `timeout` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

fn method_for(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl BackendApi for BackendHttpClient {
    async fn send(&self, request: BackendRequest) -> Result<Envelope<Value>, BackendApiError> {
        debug!(method = %request.method, url = %request.url, "calling backend");
        let mut builder = self
            .client
            .request(method_for(request.method), request.url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &request.token {
            builder = builder.header(AUTHORIZATION, token.header_value());
        }
        builder = match request.body {
            BackendBody::Empty => builder,
            BackendBody::Json(value) => builder.json(&value),
            BackendBody::Multipart {
                content_type,
                bytes,
            } => builder.header(CONTENT_TYPE, content_type).body(bytes),
            BackendBody::Form(payload) => {
                builder.multipart(multipart_form(payload).map_err(map_transport_error)?)
            }
        };

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode_envelope(body.as_ref())
    }
}

fn decode_envelope(body: &[u8]) -> Result<Envelope<Value>, BackendApiError> {
    serde_json::from_slice(body).map_err(|error| {
        BackendApiError::decode(format!("{error}; body: {}", body_preview(body)))
    })
}

fn map_transport_error(error: reqwest::Error) -> BackendApiError {
    if error.is_timeout() {
        BackendApiError::timeout(error.to_string())
    } else {
        BackendApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> BackendApiError {
    BackendApiError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY, b"upstream down".as_slice(), "502 - upstream down")]
    #[case::not_found(StatusCode::NOT_FOUND, b"".as_slice(), "404 - ")]
    #[case::compacts_whitespace(StatusCode::BAD_REQUEST, b"{\n  \"error\": \"x\"\n}".as_slice(), "400 - { \"error\": \"x\" }")]
    fn status_errors_carry_status_and_body(
        #[case] status: StatusCode,
        #[case] body: &[u8],
        #[case] expected: &str,
    ) {
        let error = map_status_error(status, body);
        assert!(matches!(error, BackendApiError::Status { .. }));
        assert_eq!(error.kind(), "status");
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let body = "a".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.len(), 163);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn decodes_backend_envelope() {
        let envelope = decode_envelope(br#"{"success":true,"data":[1,2]}"#).expect("envelope");
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(json!([1, 2])));
    }

    #[rstest]
    #[case::html(b"<html>oops</html>".as_slice())]
    #[case::array(b"[1,2]".as_slice())]
    fn non_envelope_bodies_are_decode_errors(#[case] body: &[u8]) {
        let error = decode_envelope(body).expect_err("should not decode");
        assert!(matches!(error, BackendApiError::Decode { .. }));
    }

    #[rstest]
    #[case(HttpMethod::Get, Method::GET)]
    #[case(HttpMethod::Post, Method::POST)]
    #[case(HttpMethod::Put, Method::PUT)]
    #[case(HttpMethod::Delete, Method::DELETE)]
    fn methods_map_one_to_one(#[case] method: HttpMethod, #[case] expected: Method) {
        assert_eq!(method_for(method), expected);
    }
}
