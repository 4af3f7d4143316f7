//! Lifting Actix requests into proxy calls and proxy outcomes into responses.

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse};

use super::auth::bearer_token;
use super::state::HttpState;
use crate::domain::{InboundBody, ProxyOutcome, ProxyRequest, ProxyRoute, SearchParams};

/// Largest inbound body accepted, sized for feed image uploads.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const MULTIPART_ESSENCE: &str = "multipart/form-data";

/// Classify the raw inbound body by its content type.
///
/// Multipart bodies keep their full content type so the boundary survives;
/// anything else is left for the route's JSON policy to parse.
pub fn inbound_body(req: &HttpRequest, body: Bytes) -> InboundBody {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case(MULTIPART_ESSENCE) {
        return InboundBody::Multipart {
            content_type: content_type.to_owned(),
            bytes: body.to_vec(),
        };
    }
    if body.is_empty() {
        InboundBody::Empty
    } else {
        InboundBody::Raw(body.to_vec())
    }
}

/// Build the proxy call for `route` from the request's query, body and
/// credentials.
pub fn proxy_request(route: ProxyRoute, req: &HttpRequest, body: Bytes) -> ProxyRequest {
    ProxyRequest::new(route)
        .with_query(SearchParams::from_query_str(req.query_string()))
        .with_body(inbound_body(req, body))
        .with_token(bearer_token(req))
}

/// Run `request` through the proxy and render the envelope.
pub async fn forward(state: &HttpState, request: ProxyRequest) -> HttpResponse {
    HttpResponse::from(state.proxy.forward(request).await)
}

impl From<ProxyOutcome> for HttpResponse {
    fn from(outcome: ProxyOutcome) -> Self {
        let status =
            StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(outcome.into_envelope())
    }
}
