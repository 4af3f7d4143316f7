//! Caller credential extraction used by HTTP handlers.
//!
//! The gateway does not authenticate anyone. It only picks up whatever token
//! the caller presented so the route proxy can forward it to the backend.

use actix_web::HttpRequest;
use actix_web::http::header::AUTHORIZATION;

use crate::domain::BearerToken;

/// Cookie set by the admin login flow.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Token from the `Authorization` header, else from the `accessToken` cookie.
///
/// A blank or non-UTF-8 header falls through to the cookie; absence of both
/// is not an error.
pub fn bearer_token(req: &HttpRequest) -> Option<BearerToken> {
    let from_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(BearerToken::parse);
    from_header.or_else(|| {
        req.cookie(ACCESS_TOKEN_COOKIE)
            .and_then(|cookie| BearerToken::parse(cookie.value()))
    })
}
