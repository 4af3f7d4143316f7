//! Port through which resource stores reach the route proxy.
//!
//! Stores never talk to the backend directly. Production wiring points this
//! port at the gateway over HTTP; tests and embedded callers can run the proxy
//! in process.
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Envelope, Error, ProxyRequest};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GatewayApi: Send + Sync {
    /// Issue one proxied call.
    ///
    /// A failure envelope is returned as `Ok`; `Err` is reserved for calls
    /// that never produced an envelope.
    async fn call(&self, request: ProxyRequest) -> Result<Envelope<Value>, Error>;
}
