//! Dashboard counters handler.

use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, get, web};

use super::proxy_call::{forward, proxy_request};
use super::state::HttpState;
use crate::domain::{EnvelopeSchema, ProxyRoute};

#[utoipa::path(
    get,
    path = "/api/dashboard/init-stat",
    responses(
        (status = 200, description = "Dashboard counters", body = EnvelopeSchema),
        (status = 500, description = "Backend or transport failure", body = EnvelopeSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardInitStat"
)]
#[get("/dashboard/init-stat")]
pub async fn init_stat(state: web::Data<HttpState>, req: HttpRequest) -> HttpResponse {
    forward(&state, proxy_request(ProxyRoute::DashboardStats, &req, Bytes::new())).await
}
