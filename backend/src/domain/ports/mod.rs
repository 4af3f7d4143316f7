//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod backend_api;
mod gateway_api;
mod query_cache;

#[cfg(test)]
pub use backend_api::MockBackendApi;
pub use backend_api::{BackendApi, BackendApiError, BackendBody, BackendRequest};
#[cfg(test)]
pub use gateway_api::MockGatewayApi;
pub use gateway_api::GatewayApi;
#[cfg(test)]
pub use query_cache::MockQueryCache;
pub use query_cache::{
    CachedEntry, QueryCache, QueryCacheError, QueryCacheKey, QueryCacheKeyValidationError,
};
