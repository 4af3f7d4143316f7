//! AI summary search handler.

use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, get, web};

use super::proxy_call::{forward, proxy_request};
use super::state::HttpState;
use crate::domain::{EnvelopeSchema, ProxyRoute};

/// Search summaries. No default paging is injected.
#[utoipa::path(
    get,
    path = "/api/summaries",
    params(
        ("user_hash" = Option<String>, Query, description = "Owner view hash"),
        ("model" = Option<String>, Query, description = "Model name"),
        ("startDate" = Option<String>, Query, description = "Inclusive start date"),
        ("endDate" = Option<String>, Query, description = "Inclusive end date"),
        ("nickname" = Option<String>, Query, description = "Owner nickname"),
        ("search_type" = Option<String>, Query, description = "Field searched by search_value"),
        ("search_value" = Option<String>, Query, description = "Search text"),
        ("limit" = Option<u32>, Query, description = "Page size"),
        ("offset" = Option<u64>, Query, description = "Items to skip")
    ),
    responses(
        (status = 200, description = "Summaries", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["summaries"],
    operation_id = "searchSummaries"
)]
#[get("/summaries")]
pub async fn search_summaries(state: web::Data<HttpState>, req: HttpRequest) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::SummarySearch, &req, Bytes::new())).await
}
