//! Notice API handlers.
//!
//! ```text
//! GET    /api/notices
//! POST   /api/notices {"title":"…","content":"…","category":"…","is_important":"N"}
//! PUT    /api/notices?view_hash=h {"type":"status_toggle","is_active":"N"}
//! DELETE /api/notices?view_hash=h
//! ```

use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use super::proxy_call::{forward, proxy_request};
use super::state::HttpState;
use crate::domain::{EnvelopeSchema, ProxyRoute};

/// List every notice.
#[utoipa::path(
    get,
    path = "/api/notices",
    responses(
        (status = 200, description = "Notices", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["notices"],
    operation_id = "listNotices"
)]
#[get("/notices")]
pub async fn list_notices(state: web::Data<HttpState>, req: HttpRequest) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::NoticeList, &req, Bytes::new())).await
}

/// Create a notice. An empty body is rejected before the backend is called.
#[utoipa::path(
    post,
    path = "/api/notices",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Notice created", body = EnvelopeSchema),
        (status = 500, description = "Validation, backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["notices"],
    operation_id = "createNotice"
)]
#[post("/notices")]
pub async fn create_notice(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::NoticeCreate, &req, body)).await
}

/// Update a notice, or flip its status when the body says
/// `"type": "status_toggle"`.
#[utoipa::path(
    put,
    path = "/api/notices",
    params(("view_hash" = String, Query, description = "Notice identifier")),
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Notice updated", body = EnvelopeSchema),
        (status = 500, description = "Missing view_hash, backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["notices"],
    operation_id = "updateNotice"
)]
#[put("/notices")]
pub async fn update_notice(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::NoticeUpdate, &req, body)).await
}

/// Delete a notice.
#[utoipa::path(
    delete,
    path = "/api/notices",
    params(("view_hash" = String, Query, description = "Notice identifier")),
    responses(
        (status = 200, description = "Notice deleted", body = EnvelopeSchema),
        (status = 500, description = "Missing view_hash, backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["notices"],
    operation_id = "deleteNotice"
)]
#[delete("/notices")]
pub async fn delete_notice(state: web::Data<HttpState>, req: HttpRequest) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::NoticeDelete, &req, Bytes::new())).await
}

#[cfg(test)]
#[path = "notices_tests.rs"]
mod tests;
