//! Route proxy service.
//!
//! Translates one inbound call into exactly one backend call and normalises
//! whatever comes back into an [`Envelope`]. Nothing in here returns `Err`:
//! every failure, local or remote, becomes a [`ProxyOutcome::Failure`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::models::MultipartPayload;
use crate::domain::models::notices::STATUS_TOGGLE;
use crate::domain::ports::{BackendApi, BackendApiError, BackendBody, BackendRequest};
use crate::domain::routes::{BodyPolicy, IdParam};
use crate::domain::{
    BackendRoutes, BearerToken, Envelope, Error, ProxyRoute, SearchParams, TraceId,
};

/// Message for a required body that is missing or empty.
pub const EMPTY_BODY_MESSAGE: &str = "요청 본문이 비어 있습니다.";
/// Message for a JSON body that does not parse.
pub const INVALID_JSON_MESSAGE: &str = "요청 본문이 올바른 JSON 형식이 아닙니다.";
/// Message for a multipart body without a usable content type.
pub const INVALID_MULTIPART_MESSAGE: &str = "요청 본문이 올바른 multipart 형식이 아닙니다.";

const TRANSPORT_PREFIX: &str = "API 요청 실패";

/// Body of an inbound call, before the route's body policy is applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InboundBody {
    /// No body.
    #[default]
    Empty,
    /// Already-parsed JSON.
    Json(Value),
    /// Unparsed bytes expected to hold JSON.
    Raw(Vec<u8>),
    /// Encoded multipart bytes with their content type.
    Multipart {
        /// Content type including the boundary.
        content_type: String,
        /// Encoded form.
        bytes: Vec<u8>,
    },
    /// Structured multipart form, encoded by the outbound adapter.
    Form(MultipartPayload),
}

/// One inbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRequest {
    pub route: ProxyRoute,
    /// Identifier taken from the query or the path, per [`ProxyRoute::id_param`].
    pub target_id: Option<String>,
    pub query: SearchParams,
    pub body: InboundBody,
    pub token: Option<BearerToken>,
}

impl ProxyRequest {
    /// Call `route` with no identifier, query, body or token.
    #[must_use]
    pub fn new(route: ProxyRoute) -> Self {
        Self {
            route,
            target_id: None,
            query: SearchParams::new(),
            body: InboundBody::Empty,
            token: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, id: impl Into<String>) -> Self {
        self.target_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: SearchParams) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = InboundBody::Json(body);
        self
    }

    #[must_use]
    pub fn with_form(mut self, form: MultipartPayload) -> Self {
        self.body = InboundBody::Form(form);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: InboundBody) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<BearerToken>) -> Self {
        self.token = token;
        self
    }

    /// Identifier to use, falling back to the configured query parameter.
    fn resolved_target(&self) -> Option<String> {
        let explicit = self.target_id.as_deref().map(str::trim);
        let from_query = match self.route.id_param() {
            Some(IdParam::Query(name)) => self.query.text(name).map(str::trim),
            _ => None,
        };
        explicit
            .filter(|id| !id.is_empty())
            .or_else(|| from_query.filter(|id| !id.is_empty()))
            .map(str::to_owned)
    }
}

/// Normalised result of one proxied call.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyOutcome {
    /// The backend confirmed the operation.
    Success {
        /// Route that actually ran.
        route: ProxyRoute,
        /// Backend `data`, untouched.
        data: Option<Value>,
    },
    /// Anything else.
    Failure {
        /// Route that was attempted.
        route: ProxyRoute,
        /// Classified failure.
        error: Error,
    },
}

impl ProxyOutcome {
    /// HTTP status for the outbound response: 200 or 500.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::Failure { .. } => 500,
        }
    }

    /// Route that produced this outcome.
    #[must_use]
    pub const fn route(&self) -> ProxyRoute {
        match self {
            Self::Success { route, .. } | Self::Failure { route, .. } => *route,
        }
    }

    /// Render as the gateway's response envelope.
    #[must_use]
    pub fn into_envelope(self) -> Envelope<Value> {
        match self {
            Self::Success { route, data } => Envelope::success(route.messages().success, data),
            Self::Failure { error, .. } => Envelope::failure(error.message()),
        }
    }

    /// Success data or the classified error.
    ///
    /// # Errors
    /// Returns the failure's [`Error`].
    pub fn into_result(self) -> Result<Option<Value>, Error> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { error, .. } => Err(error),
        }
    }
}

/// Forwards inbound calls to the backend through [`BackendApi`].
#[derive(Clone)]
pub struct RouteProxy {
    backend: Arc<dyn BackendApi>,
    routes: BackendRoutes,
}

impl RouteProxy {
    /// Build a proxy over `backend`, addressing URLs from `routes`.
    pub fn new(backend: Arc<dyn BackendApi>, routes: BackendRoutes) -> Self {
        Self { backend, routes }
    }

    /// Backend URL builder in use.
    #[must_use]
    pub fn routes(&self) -> &BackendRoutes {
        &self.routes
    }

    /// Forward `request` and normalise the result.
    pub async fn forward(&self, request: ProxyRequest) -> ProxyOutcome {
        let trace_id = TraceId::current_label();
        let fingerprint = request.token.as_ref().map(BearerToken::fingerprint);
        let route = request.route;
        let outcome = match self.prepare(request) {
            Ok(prepared) => self.dispatch(prepared).await,
            Err(error) => ProxyOutcome::Failure { route, error },
        };
        match &outcome {
            ProxyOutcome::Success { route, .. } => debug!(
                %trace_id,
                route = route.name(),
                token = fingerprint.as_deref().unwrap_or("-"),
                "proxied call succeeded"
            ),
            ProxyOutcome::Failure { route, error } => warn!(
                %trace_id,
                route = route.name(),
                code = ?error.code(),
                token = fingerprint.as_deref().unwrap_or("-"),
                message = error.message(),
                "proxied call failed"
            ),
        }
        outcome
    }

    fn prepare(&self, request: ProxyRequest) -> Result<(ProxyRoute, BackendRequest), Error> {
        let target = match request.route.id_param() {
            Some(_) => Some(
                request
                    .resolved_target()
                    .ok_or_else(|| Error::validation(request.route.missing_id_message()))?,
            ),
            None => None,
        };
        let body = prepare_body(request.route.body_policy(), request.body)?;
        let route = resolve_action(request.route, &body);
        let query = route.forwarded_query(&request.query);
        let url = self.routes.url_for(route, target.as_deref(), &query);
        Ok((
            route,
            BackendRequest {
                method: route.method(),
                url,
                body,
                token: request.token,
            },
        ))
    }

    async fn dispatch(&self, (route, request): (ProxyRoute, BackendRequest)) -> ProxyOutcome {
        let messages = route.messages();
        match self.backend.send(request).await {
            Ok(envelope) if envelope.success => ProxyOutcome::Success {
                route,
                data: envelope.data,
            },
            Ok(envelope) => ProxyOutcome::Failure {
                route,
                error: Error::application(
                    envelope.failure_message().unwrap_or(messages.failure),
                ),
            },
            Err(error) => ProxyOutcome::Failure {
                route,
                error: map_backend_error(error, messages.unexpected),
            },
        }
    }
}

fn map_backend_error(error: BackendApiError, unexpected: &str) -> Error {
    debug!(kind = error.kind(), %error, "backend adapter error");
    match error {
        BackendApiError::Transport { message } | BackendApiError::Timeout { message } => {
            Error::transport(format!("{TRANSPORT_PREFIX}: {message}"))
        }
        BackendApiError::Status { status, body } => {
            Error::transport(format!("{TRANSPORT_PREFIX}: {status} - {body}"))
        }
        BackendApiError::Decode { message } => {
            Error::unexpected(unexpected).with_details(Value::String(message))
        }
    }
}

/// Notice updates whose body says `type: status_toggle` go to the toggle
/// endpoint instead.
fn resolve_action(route: ProxyRoute, body: &BackendBody) -> ProxyRoute {
    match (route, body) {
        (ProxyRoute::NoticeUpdate, BackendBody::Json(value))
            if value.get("type").and_then(Value::as_str) == Some(STATUS_TOGGLE) =>
        {
            ProxyRoute::NoticeToggleStatus
        }
        _ => route,
    }
}

fn is_blank_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn prepare_body(policy: BodyPolicy, body: InboundBody) -> Result<BackendBody, Error> {
    match policy {
        BodyPolicy::Empty => Ok(BackendBody::Empty),
        BodyPolicy::Json { required } => prepare_json(required, body),
        BodyPolicy::Multipart => prepare_multipart(body),
    }
}

fn prepare_json(required: bool, body: InboundBody) -> Result<BackendBody, Error> {
    let value = match body {
        InboundBody::Empty => None,
        InboundBody::Json(value) => Some(value),
        InboundBody::Raw(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => None,
        InboundBody::Raw(bytes) => Some(
            serde_json::from_slice(&bytes)
                .map_err(|_| Error::validation(INVALID_JSON_MESSAGE))?,
        ),
        InboundBody::Multipart { .. } | InboundBody::Form(_) => {
            return Err(Error::validation(INVALID_JSON_MESSAGE));
        }
    };
    match value {
        Some(value) if !is_blank_json(&value) => Ok(BackendBody::Json(value)),
        _ if required => Err(Error::validation(EMPTY_BODY_MESSAGE)),
        Some(Value::Object(map)) => Ok(BackendBody::Json(Value::Object(map))),
        _ => Ok(BackendBody::Empty),
    }
}

fn has_boundary(content_type: &str) -> bool {
    let mut parts = content_type.split(';').map(str::trim);
    let essence_ok = parts
        .next()
        .is_some_and(|essence| essence.eq_ignore_ascii_case("multipart/form-data"));
    essence_ok
        && parts.any(|param| {
            param
                .split_once('=')
                .is_some_and(|(name, value)| {
                    name.trim().eq_ignore_ascii_case("boundary") && !value.trim().is_empty()
                })
        })
}

fn prepare_multipart(body: InboundBody) -> Result<BackendBody, Error> {
    match body {
        InboundBody::Form(form) => Ok(BackendBody::Form(form)),
        InboundBody::Multipart { bytes, .. } if bytes.is_empty() => {
            Err(Error::validation(EMPTY_BODY_MESSAGE))
        }
        InboundBody::Multipart {
            content_type,
            bytes,
        } if has_boundary(&content_type) => Ok(BackendBody::Multipart {
            content_type,
            bytes,
        }),
        InboundBody::Empty => Err(Error::validation(EMPTY_BODY_MESSAGE)),
        InboundBody::Raw(bytes) if bytes.is_empty() => Err(Error::validation(EMPTY_BODY_MESSAGE)),
        _ => Err(Error::validation(INVALID_MULTIPART_MESSAGE)),
    }
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;
