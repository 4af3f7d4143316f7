//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the route proxy and remain testable without network I/O.

use std::sync::Arc;

use crate::domain::RouteProxy;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub proxy: Arc<RouteProxy>,
}

impl HttpState {
    pub fn new(proxy: Arc<RouteProxy>) -> Self {
        Self { proxy }
    }
}
