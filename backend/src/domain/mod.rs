//! Domain primitives, the route proxy and the resource stores.
//!
//! Purpose: describe the gateway's contract with the backend independently of
//! any transport. Inbound adapters turn HTTP requests into [`ProxyRequest`]s;
//! outbound adapters implement the ports in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: classified failure carried by the failure envelope.
//! - Envelope: `{success, message, data, error}` wire shape on both sides.
//! - ProxyRoute / BackendRoutes: route table and backend URL builder.
//! - RouteProxy / ProxyRequest / ProxyOutcome: one inbound call, one backend
//!   call, one normalised outcome.
//! - stores: per-resource state driven through the `GatewayApi` port.

pub mod debounce;
pub mod envelope;
pub mod error;
pub mod models;
pub mod ports;
pub mod proxy;
pub mod query_cache;
pub mod routes;
pub mod search;
pub mod stores;
pub mod token;
pub mod trace_id;

pub use self::envelope::{Envelope, EnvelopeSchema};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::proxy::{InboundBody, ProxyOutcome, ProxyRequest, RouteProxy};
pub use self::query_cache::{CachePolicy, ReadThroughCache};
pub use self::routes::{BackendRoutes, HttpMethod, ProxyRoute};
pub use self::search::{SearchParams, SearchValue};
pub use self::token::BearerToken;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for store and handler code.
///
/// # Examples
/// ```
/// use oncare_gateway::domain::{ApiResult, Error};
///
/// fn missing() -> ApiResult<()> {
///     Err(Error::validation("공지사항 ID가 제공되지 않았습니다."))
/// }
/// assert!(missing().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
