//! `GatewayApi` adapters used by the resource stores.
//!
//! [`GatewayHttpClient`] calls a running gateway over HTTP, the way an admin
//! front end would. [`InProcessGateway`] runs the route proxy directly, which
//! suits embedding and integration tests.

mod http_client;
mod in_process;

pub use http_client::GatewayHttpClient;
pub use in_process::InProcessGateway;
