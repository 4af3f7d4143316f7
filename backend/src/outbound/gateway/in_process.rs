//! In-process gateway running the route proxy without an HTTP hop.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::GatewayApi;
use crate::domain::{Envelope, Error, ProxyRequest, RouteProxy};

/// [`GatewayApi`] backed directly by a [`RouteProxy`].
#[derive(Clone)]
pub struct InProcessGateway {
    proxy: Arc<RouteProxy>,
}

impl InProcessGateway {
    pub fn new(proxy: Arc<RouteProxy>) -> Self {
        Self { proxy }
    }
}

#[async_trait]
impl GatewayApi for InProcessGateway {
    async fn call(&self, request: ProxyRequest) -> Result<Envelope<Value>, Error> {
        Ok(self.proxy.forward(request).await.into_envelope())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BackendRoutes, ProxyRoute};
    use crate::test_support::{StubBackend, ok_envelope};
    use serde_json::json;
    use url::Url;

    #[tokio::test]
    async fn returns_the_gateway_envelope() {
        let backend = StubBackend::always(ok_envelope(json!({"total_users": 3})));
        let routes = BackendRoutes::new(Url::parse("http://backend.test").expect("url"));
        let gateway = InProcessGateway::new(Arc::new(RouteProxy::new(Arc::new(backend), routes)));

        let envelope = gateway
            .call(ProxyRequest::new(ProxyRoute::DashboardStats))
            .await
            .expect("envelope");

        assert!(envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("대시보드 통계 조회 성공"));
        assert_eq!(envelope.data, Some(json!({"total_users": 3})));
    }
}
