//! Member API handlers.
//!
//! ```text
//! GET /api/users?page=2&limit=10&nickname=kim
//! PUT /api/users {"view_hash":"h","is_active":0}
//! PUT /api/users/password-reset {"view_hash":"h"}
//! ```

use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, get, put, web};

use super::proxy_call::{forward, proxy_request};
use super::state::HttpState;
use crate::domain::{EnvelopeSchema, ProxyRoute};

/// One page of members. Every non-empty query parameter is forwarded.
#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Page size"),
        ("sns_id" = Option<String>, Query, description = "SNS identifier filter"),
        ("name" = Option<String>, Query, description = "Name filter"),
        ("nickname" = Option<String>, Query, description = "Nickname filter")
    ),
    responses(
        (status = 200, description = "Member page", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>, req: HttpRequest) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::UserList, &req, Bytes::new())).await
}

#[utoipa::path(
    put,
    path = "/api/users",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Member status changed", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users")]
pub async fn update_user(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::UserUpdate, &req, body)).await
}

#[utoipa::path(
    put,
    path = "/api/users/password-reset",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Password reset", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "resetPassword"
)]
#[put("/users/password-reset")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::UserResetPassword, &req, body)).await
}
