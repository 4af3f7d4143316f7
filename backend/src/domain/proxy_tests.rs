//! Tests for the route proxy service.

use std::sync::{Arc, Mutex};

use rstest::rstest;
use serde_json::json;
use url::Url;

use super::*;
use crate::domain::ports::MockBackendApi;
use crate::domain::{ErrorCode, HttpMethod};

fn routes() -> BackendRoutes {
    BackendRoutes::new(Url::parse("http://backend.test").expect("url"))
}

/// Backend mock that records every request and answers with `reply`.
fn recording_backend(
    reply: Result<Envelope<Value>, BackendApiError>,
) -> (MockBackendApi, Arc<Mutex<Vec<BackendRequest>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut backend = MockBackendApi::new();
    backend.expect_send().returning(move |request| {
        sink.lock().expect("request log").push(request);
        reply.clone()
    });
    (backend, seen)
}

fn proxy(backend: MockBackendApi) -> RouteProxy {
    RouteProxy::new(Arc::new(backend), routes())
}

fn ok(data: Value) -> Result<Envelope<Value>, BackendApiError> {
    Ok(Envelope::success("backend ok", Some(data)))
}

#[tokio::test]
async fn list_without_filters_hits_bare_suffix() {
    let (backend, seen) = recording_backend(ok(json!([])));
    let outcome = proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::NoticeList))
        .await;

    assert_eq!(outcome.status_code(), 200);
    let requests = seen.lock().expect("request log");
    let [request] = requests.as_slice() else {
        panic!("expected exactly one backend call");
    };
    assert_eq!(request.url.as_str(), "http://backend.test/notices/list");
    assert_eq!(request.url.query(), None);
    assert_eq!(request.method, HttpMethod::Get);
}

#[tokio::test]
async fn empty_filters_never_reach_the_backend() {
    let (backend, seen) = recording_backend(ok(json!([])));
    let query = SearchParams::from_query_str("title=&nickname=&limit=15&offset=0&foo=bar");
    proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::FeedList).with_query(query))
        .await;

    let requests = seen.lock().expect("request log");
    assert_eq!(
        requests.first().map(|request| request.url.as_str()),
        Some("http://backend.test/feeds/list?limit=15&offset=0")
    );
}

#[tokio::test]
async fn backend_failure_message_is_forwarded() {
    let envelope = Envelope {
        success: false,
        data: None,
        message: Some("ignored".to_owned()),
        error: Some("X".to_owned()),
    };
    let (backend, _) = recording_backend(Ok(envelope));
    let outcome = proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::CategoryList))
        .await;

    assert_eq!(outcome.status_code(), 500);
    let body = serde_json::to_value(outcome.into_envelope()).expect("serialise envelope");
    assert_eq!(body, json!({"success": false, "message": "X"}));
}

#[tokio::test]
async fn silent_backend_failure_uses_route_default() {
    let (backend, _) = recording_backend(Ok(Envelope::failure("")));
    let outcome = proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::FeedList))
        .await;

    let error = outcome.into_result().expect_err("failure");
    assert_eq!(error.code(), ErrorCode::Application);
    assert_eq!(error.message(), ProxyRoute::FeedList.messages().failure);
}

#[tokio::test]
async fn success_wraps_data_with_fixed_message() {
    let (backend, _) = recording_backend(ok(json!({"total_users": 3})));
    let outcome = proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::DashboardStats))
        .await;

    let body = serde_json::to_value(outcome.into_envelope()).expect("serialise envelope");
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": ProxyRoute::DashboardStats.messages().success,
            "data": {"total_users": 3}
        })
    );
}

#[rstest]
#[case::status(
    BackendApiError::status(502_u16, "{\"detail\":\"down\"}"),
    ErrorCode::Transport,
    "API 요청 실패: 502 - {\"detail\":\"down\"}"
)]
#[case::network(
    BackendApiError::transport("connection refused"),
    ErrorCode::Transport,
    "API 요청 실패: connection refused"
)]
#[case::decode(
    BackendApiError::decode("expected value"),
    ErrorCode::Unexpected,
    "회원 목록 조회 중 오류가 발생했습니다."
)]
#[tokio::test]
async fn adapter_errors_are_classified(
    #[case] failure: BackendApiError,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let (backend, _) = recording_backend(Err(failure));
    let outcome = proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::UserList))
        .await;

    let error = outcome.into_result().expect_err("failure");
    assert_eq!(error.code(), code);
    assert_eq!(error.message(), message);
}

#[rstest]
#[case::missing(InboundBody::Empty, EMPTY_BODY_MESSAGE)]
#[case::null(InboundBody::Json(Value::Null), EMPTY_BODY_MESSAGE)]
#[case::empty_object(InboundBody::Raw(b"{}".to_vec()), EMPTY_BODY_MESSAGE)]
#[case::whitespace(InboundBody::Raw(b"  \n".to_vec()), EMPTY_BODY_MESSAGE)]
#[case::malformed(InboundBody::Raw(b"{title".to_vec()), INVALID_JSON_MESSAGE)]
#[tokio::test]
async fn required_json_bodies_are_checked_locally(
    #[case] body: InboundBody,
    #[case] message: &str,
) {
    let mut backend = MockBackendApi::new();
    backend.expect_send().times(0);
    let outcome = proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::NoticeCreate).with_body(body))
        .await;

    let error = outcome.into_result().expect_err("validation failure");
    assert_eq!(error.code(), ErrorCode::Validation);
    assert_eq!(error.message(), message);
}

#[tokio::test]
async fn missing_view_hash_fails_before_backend() {
    let mut backend = MockBackendApi::new();
    backend.expect_send().times(0);
    let outcome = proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::NoticeDelete))
        .await;

    let error = outcome.into_result().expect_err("validation failure");
    assert_eq!(error.message(), "공지사항 ID가 제공되지 않았습니다.");
}

#[rstest]
#[case::field_update(json!({"title": "t"}), "http://backend.test/notices/update/abc")]
#[case::toggle(json!({"type": "status_toggle"}), "http://backend.test/notices/toggle_status/abc")]
#[tokio::test]
async fn notice_update_switches_on_action_type(#[case] body: Value, #[case] expected: &str) {
    let (backend, seen) = recording_backend(ok(Value::Null));
    let query = SearchParams::new().with("view_hash", "abc");
    let outcome = proxy(backend)
        .forward(
            ProxyRequest::new(ProxyRoute::NoticeUpdate)
                .with_query(query)
                .with_json(body),
        )
        .await;

    assert_eq!(outcome.status_code(), 200);
    let requests = seen.lock().expect("request log");
    assert_eq!(
        requests.first().map(|request| request.url.as_str()),
        Some(expected)
    );
    assert!(
        requests
            .first()
            .is_some_and(|request| request.url.query().is_none())
    );
}

#[tokio::test]
async fn path_identifiers_are_percent_encoded() {
    let (backend, seen) = recording_backend(ok(json!({})));
    proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::FeedDetail).with_target("a/b c"))
        .await;

    let requests = seen.lock().expect("request log");
    assert_eq!(
        requests.first().map(|request| request.url.as_str()),
        Some("http://backend.test/feeds/detail/a%2Fb%20c")
    );
}

#[tokio::test]
async fn multipart_bodies_pass_through_unchanged() {
    let (backend, seen) = recording_backend(ok(json!({"id": 1})));
    let body = InboundBody::Multipart {
        content_type: "multipart/form-data; boundary=xyz".to_owned(),
        bytes: b"--xyz--\r\n".to_vec(),
    };
    proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::FeedCreate).with_body(body))
        .await;

    let requests = seen.lock().expect("request log");
    assert_eq!(
        requests.first().map(|request| &request.body),
        Some(&BackendBody::Multipart {
            content_type: "multipart/form-data; boundary=xyz".to_owned(),
            bytes: b"--xyz--\r\n".to_vec(),
        })
    );
}

#[tokio::test]
async fn multipart_without_boundary_is_rejected() {
    let mut backend = MockBackendApi::new();
    backend.expect_send().times(0);
    let body = InboundBody::Multipart {
        content_type: "multipart/form-data".to_owned(),
        bytes: b"x".to_vec(),
    };
    let outcome = proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::FeedUpdate).with_body(body))
        .await;

    let error = outcome.into_result().expect_err("validation failure");
    assert_eq!(error.message(), INVALID_MULTIPART_MESSAGE);
}

#[tokio::test]
async fn structured_forms_reach_the_adapter_unencoded() {
    let (backend, seen) = recording_backend(ok(json!({"id": 1})));
    let form = MultipartPayload::new().text("title", "hello");
    proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::FeedCreate).with_form(form.clone()))
        .await;

    let requests = seen.lock().expect("request log");
    assert_eq!(
        requests.first().map(|request| &request.body),
        Some(&BackendBody::Form(form))
    );
}

#[tokio::test]
async fn token_is_forwarded_with_the_request() {
    let (backend, seen) = recording_backend(ok(json!([])));
    let token = BearerToken::parse("abc");
    proxy(backend)
        .forward(ProxyRequest::new(ProxyRoute::SummarySearch).with_token(token.clone()))
        .await;

    let requests = seen.lock().expect("request log");
    assert_eq!(requests.first().and_then(|r| r.token.clone()), token);
}
