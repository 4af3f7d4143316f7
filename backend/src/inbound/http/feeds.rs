//! Feed API handlers.
//!
//! ```text
//! GET    /api/feeds?limit=15&offset=0&sort_by=like_count_desc
//! GET    /api/feeds/{feed_id}
//! POST   /api/feeds              multipart: title, content, is_public, tags, file
//! PUT    /api/feeds              multipart: feed_id, title, content, …
//! DELETE /api/feeds              {"feed_id":7}
//! POST   /api/feeds/like         {"feed_id":7}
//! POST   /api/feeds/bookmark     {"feed_id":7}
//! GET    /api/feeds/comments?feed_id=7&limit=20&offset=0
//! POST   /api/feeds/comments     {"feed_id":7,"comment":"…","parent_hash":"c1"}
//! DELETE /api/feeds/comments?comment_hash=c1
//! ```

use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use super::proxy_call::{forward, proxy_request};
use super::state::HttpState;
use crate::domain::{EnvelopeSchema, ProxyRoute};

/// One window of the feed list. Only the known filters are forwarded.
#[utoipa::path(
    get,
    path = "/api/feeds",
    params(
        ("limit" = Option<u32>, Query, description = "Window size"),
        ("offset" = Option<u64>, Query, description = "Items to skip"),
        ("title" = Option<String>, Query, description = "Title filter"),
        ("nickname" = Option<String>, Query, description = "Author nickname filter"),
        ("start_date" = Option<String>, Query, description = "Inclusive start date, YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "Inclusive end date, YYYY-MM-DD"),
        ("sort_by" = Option<String>, Query, description = "created_at, like_count_asc or like_count_desc")
    ),
    responses(
        (status = 200, description = "Feeds", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["feeds"],
    operation_id = "listFeeds"
)]
#[get("/feeds")]
pub async fn list_feeds(state: web::Data<HttpState>, req: HttpRequest) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::FeedList, &req, Bytes::new())).await
}

/// One feed with its comment thread.
#[utoipa::path(
    get,
    path = "/api/feeds/{feed_id}",
    params(("feed_id" = String, Path, description = "Feed identifier")),
    responses(
        (status = 200, description = "Feed detail", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["feeds"],
    operation_id = "feedDetail"
)]
#[get("/feeds/{feed_id}")]
pub async fn feed_detail(
    state: web::Data<HttpState>,
    req: HttpRequest,
    feed_id: web::Path<String>,
) -> HttpResponse {
    let request =
        proxy_request(ProxyRoute::FeedDetail, &req, Bytes::new()).with_target(feed_id.into_inner());
    forward(&state, request).await
}

/// Create a feed. The multipart body is forwarded unmodified.
#[utoipa::path(
    post,
    path = "/api/feeds",
    request_body(content = Object, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Feed created", body = EnvelopeSchema),
        (status = 500, description = "Validation, backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["feeds"],
    operation_id = "createFeed"
)]
#[post("/feeds")]
pub async fn create_feed(state: web::Data<HttpState>, req: HttpRequest, body: Bytes) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::FeedCreate, &req, body)).await
}

#[utoipa::path(
    put,
    path = "/api/feeds",
    request_body(content = Object, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Feed updated", body = EnvelopeSchema),
        (status = 500, description = "Validation, backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["feeds"],
    operation_id = "updateFeed"
)]
#[put("/feeds")]
pub async fn update_feed(state: web::Data<HttpState>, req: HttpRequest, body: Bytes) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::FeedUpdate, &req, body)).await
}

#[utoipa::path(
    delete,
    path = "/api/feeds",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Feed deleted", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["feeds"],
    operation_id = "deleteFeed"
)]
#[delete("/feeds")]
pub async fn delete_feed(state: web::Data<HttpState>, req: HttpRequest, body: Bytes) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::FeedDelete, &req, body)).await
}

/// Toggle the caller's like on a feed.
#[utoipa::path(
    post,
    path = "/api/feeds/like",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Like toggled", body = EnvelopeSchema),
        (status = 500, description = "Validation, backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["feeds"],
    operation_id = "toggleFeedLike"
)]
#[post("/feeds/like")]
pub async fn toggle_like(state: web::Data<HttpState>, req: HttpRequest, body: Bytes) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::FeedLike, &req, body)).await
}

/// Toggle the caller's bookmark on a feed.
#[utoipa::path(
    post,
    path = "/api/feeds/bookmark",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Bookmark toggled", body = EnvelopeSchema),
        (status = 500, description = "Validation, backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["feeds"],
    operation_id = "toggleFeedBookmark"
)]
#[post("/feeds/bookmark")]
pub async fn toggle_bookmark(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::FeedBookmark, &req, body)).await
}

/// Comment thread of one feed.
#[utoipa::path(
    get,
    path = "/api/feeds/comments",
    params(
        ("feed_id" = i64, Query, description = "Feed whose comments to list"),
        ("limit" = Option<u32>, Query, description = "Window size"),
        ("offset" = Option<u64>, Query, description = "Items to skip")
    ),
    responses(
        (status = 200, description = "Comments", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["feeds"],
    operation_id = "listFeedComments"
)]
#[get("/feeds/comments")]
pub async fn list_comments(state: web::Data<HttpState>, req: HttpRequest) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::FeedCommentList, &req, Bytes::new())).await
}

/// Post a comment, or a reply when `parent_hash` is set.
#[utoipa::path(
    post,
    path = "/api/feeds/comments",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Comment created", body = EnvelopeSchema),
        (status = 500, description = "Validation, backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["feeds"],
    operation_id = "createFeedComment"
)]
#[post("/feeds/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::FeedCommentCreate, &req, body)).await
}

#[utoipa::path(
    delete,
    path = "/api/feeds/comments",
    params(("comment_hash" = String, Query, description = "Comment identifier")),
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Comment deleted", body = EnvelopeSchema),
        (status = 500, description = "Missing identifier, backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["feeds"],
    operation_id = "deleteFeedComment"
)]
#[delete("/feeds/comments")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::FeedCommentDelete, &req, body)).await
}

#[cfg(test)]
#[path = "feeds_tests.rs"]
mod tests;
