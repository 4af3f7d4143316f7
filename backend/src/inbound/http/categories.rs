//! Category code API handlers.
//!
//! ```text
//! GET    /api/category-codes
//! POST   /api/category-codes {"type":"AGE_GROUP","value":"0-6개월","sort":1,"is_active":"Y"}
//! PUT    /api/category-codes {"category_id":42,…}
//! DELETE /api/category-codes {"category_id":42}
//! ```

use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use super::proxy_call::{forward, proxy_request};
use super::state::HttpState;
use crate::domain::{EnvelopeSchema, ProxyRoute};

/// Category codes grouped by type.
#[utoipa::path(
    get,
    path = "/api/category-codes",
    responses(
        (status = 200, description = "Category groups", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/category-codes")]
pub async fn list_categories(state: web::Data<HttpState>, req: HttpRequest) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::CategoryList, &req, Bytes::new())).await
}

#[utoipa::path(
    post,
    path = "/api/category-codes",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Category created", body = EnvelopeSchema),
        (status = 500, description = "Validation, backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/category-codes")]
pub async fn create_category(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::CategoryCreate, &req, body)).await
}

#[utoipa::path(
    put,
    path = "/api/category-codes",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Category updated", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/category-codes")]
pub async fn update_category(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::CategoryUpdate, &req, body)).await
}

/// Delete a category; the identifier travels in the JSON body.
#[utoipa::path(
    delete,
    path = "/api/category-codes",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Category deleted", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/category-codes")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::CategoryDelete, &req, body)).await
}
