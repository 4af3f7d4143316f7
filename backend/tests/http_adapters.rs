//! The reqwest adapters against live local servers: the backend client
//! talking to a scripted backend, and the gateway client talking to a real
//! gateway app in front of that backend.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::web::Bytes;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use oncare_gateway::Trace;
use oncare_gateway::domain::models::{Attachment, FeedForm, MultipartPayload, NoticeFilter};
use oncare_gateway::domain::ports::{BackendApi, BackendApiError, BackendBody, BackendRequest};
use oncare_gateway::domain::stores::{FeedStore, NoticeStore, StoreGateway};
use oncare_gateway::domain::{BackendRoutes, BearerToken, HttpMethod, RouteProxy};
use oncare_gateway::inbound::http::configure_api;
use oncare_gateway::inbound::http::state::HttpState;
use oncare_gateway::outbound::backend::BackendHttpClient;
use oncare_gateway::outbound::gateway::GatewayHttpClient;
use serde_json::json;
use url::Url;

async fn notice_list(req: HttpRequest) -> HttpResponse {
    let auth = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": [{ "id": 1, "title": "휴원 안내", "admin_name": auth, "view_hash": "h1" }]
    }))
}

async fn notice_delete() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": false, "error": "삭제할 수 없는 공지입니다." }))
}

async fn feed_upload(req: HttpRequest, body: Bytes) -> HttpResponse {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let text = String::from_utf8_lossy(&body).into_owned();
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": { "content_type": content_type, "has_title": text.contains("소풍"), "has_file": text.contains("photo.png") }
    }))
}

async fn form_echo(req: HttpRequest, body: Bytes) -> HttpResponse {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": { "content_type": content_type, "body": String::from_utf8_lossy(&body) }
    }))
}

async fn bad_gateway() -> HttpResponse {
    HttpResponse::BadGateway().body("upstream   down")
}

async fn not_json() -> HttpResponse {
    HttpResponse::Ok().body("<html>maintenance</html>")
}

fn base_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}")).expect("server url")
}

fn spawn_backend() -> Url {
    let server = HttpServer::new(|| {
        App::new()
            .route("/notices/list", web::get().to(notice_list))
            .route("/notices/delete/{hash}", web::delete().to(notice_delete))
            .route("/feeds/create", web::post().to(feed_upload))
            .route("/forms/echo", web::post().to(form_echo))
            .route("/feeds/list", web::get().to(|| async {
                HttpResponse::Ok().json(json!({ "success": true, "data": [] }))
            }))
            .route("/dashboard/init/stat", web::get().to(bad_gateway))
            .route("/summaries/search", web::get().to(not_json))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind stub backend");
    let addr = *server.addrs().first().expect("backend address");
    actix_rt::spawn(server.run());
    base_url(addr)
}

fn spawn_gateway(backend: Url) -> Url {
    let client = BackendHttpClient::new(None).expect("backend client");
    let proxy = RouteProxy::new(Arc::new(client), BackendRoutes::new(backend));
    let state = web::Data::new(HttpState::new(Arc::new(proxy)));
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .service(web::scope("/api").configure(configure_api))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind gateway");
    let addr = *server.addrs().first().expect("gateway address");
    actix_rt::spawn(server.run());
    base_url(addr)
}

fn get(url: Url) -> BackendRequest {
    BackendRequest {
        method: HttpMethod::Get,
        url,
        body: BackendBody::Empty,
        token: None,
    }
}

#[actix_web::test]
async fn backend_client_forwards_the_bearer_token() {
    let base = spawn_backend();
    let client = BackendHttpClient::new(None).expect("client");
    let request = BackendRequest {
        token: BearerToken::parse("abc"),
        ..get(base.join("notices/list").expect("url"))
    };

    let envelope = client.send(request).await.expect("envelope");

    assert!(envelope.success);
    let data = envelope.data.expect("data");
    assert_eq!(data[0]["admin_name"], "Bearer abc");
}

#[actix_web::test]
async fn backend_client_escapes_form_field_names() {
    let base = spawn_backend();
    let client = BackendHttpClient::new(None).expect("client");
    let form = MultipartPayload::new()
        .text("title\r\nX-Injected: 1", "소풍")
        .attach(Some(Attachment {
            field: "file".to_owned(),
            file_name: "a\r\nX-Evil: 1.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes: vec![1, 2, 3],
        }));
    let request = BackendRequest {
        method: HttpMethod::Post,
        body: BackendBody::Form(form),
        ..get(base.join("forms/echo").expect("url"))
    };

    let data = client.send(request).await.expect("envelope").data.expect("data");

    let content_type = data["content_type"].as_str().expect("content type");
    let body = data["body"].as_str().expect("body");
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(body.contains("소풍"));
    assert!(!body.contains("\r\nX-Injected: 1"));
    assert!(!body.contains("\r\nX-Evil: 1"));
}

#[actix_web::test]
async fn backend_client_reports_status_failures_with_a_preview() {
    let base = spawn_backend();
    let client = BackendHttpClient::new(None).expect("client");

    let err = client
        .send(get(base.join("dashboard/init/stat").expect("url")))
        .await
        .expect_err("502");

    assert_eq!(err, BackendApiError::status(502_u16, "upstream down"));
}

#[actix_web::test]
async fn backend_client_rejects_non_envelope_bodies() {
    let base = spawn_backend();
    let client = BackendHttpClient::new(None).expect("client");

    let err = client
        .send(get(base.join("summaries/search").expect("url")))
        .await
        .expect_err("not json");

    assert!(matches!(err, BackendApiError::Decode { .. }));
}

#[actix_web::test]
async fn backend_client_reports_unreachable_hosts_as_transport_errors() {
    let client = BackendHttpClient::new(None).expect("client");
    let url = Url::parse("http://127.0.0.1:1/notices/list").expect("url");

    let err = client.send(get(url)).await.expect_err("refused");

    assert!(matches!(err, BackendApiError::Transport { .. }));
}

#[actix_web::test]
async fn stores_round_trip_through_a_live_gateway() {
    let gateway_url = spawn_gateway(spawn_backend());
    let client = GatewayHttpClient::new(gateway_url, None).expect("gateway client");
    let gateway = StoreGateway::new(Arc::new(client)).with_token(BearerToken::parse("abc"));
    let store = NoticeStore::new(gateway);

    let notices = store.fetch(NoticeFilter::default()).await.expect("notices");
    let refused = store.delete("h1").await.expect_err("backend refuses");

    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].author, "Bearer abc");
    assert_eq!(refused.message(), "삭제할 수 없는 공지입니다.");
}

#[actix_web::test]
async fn feed_uploads_reach_the_backend_as_multipart() {
    let gateway_url = spawn_gateway(spawn_backend());
    let client = GatewayHttpClient::new(gateway_url, None).expect("gateway client");
    let store = FeedStore::new(StoreGateway::new(Arc::new(client)));
    let form = FeedForm {
        title: "소풍".to_owned(),
        content: "다녀왔어요".to_owned(),
        is_public: true,
        tags: None,
        image: Some(Attachment {
            field: "file".to_owned(),
            file_name: "photo.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }),
    };

    let data = store.create(&form).await.expect("upload").expect("data");

    let content_type = data["content_type"].as_str().expect("content type");
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert_eq!(data["has_title"], true);
    assert_eq!(data["has_file"], true);
}
