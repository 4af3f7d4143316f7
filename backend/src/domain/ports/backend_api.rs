//! Port for the external backend HTTP API.
//!
//! The route proxy builds a fully resolved [`BackendRequest`] and hands it to
//! this port; adapters only own transport concerns and return the decoded
//! envelope untouched.
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::define_port_error;
use crate::domain::models::MultipartPayload;
use crate::domain::{BearerToken, Envelope, HttpMethod};

define_port_error! {
    /// Errors surfaced by backend adapters.
    pub enum BackendApiError {
        /// The request never produced a response.
        Transport { message: String } => "{message}",
        /// The backend did not answer within the configured timeout.
        Timeout { message: String } => "{message}",
        /// The backend answered with a non-2xx status.
        Status { status: u16, body: String } => "{status} - {body}",
        /// The response body was not an envelope.
        Decode { message: String } => "invalid backend payload: {message}",
    }
}

/// Body forwarded to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendBody {
    /// No body.
    Empty,
    /// JSON document.
    Json(Value),
    /// Raw `multipart/form-data` bytes and their content type.
    Multipart {
        /// Content type including the boundary parameter.
        content_type: String,
        /// Encoded form.
        bytes: Vec<u8>,
    },
    /// Structured form; the adapter chooses the boundary and encoding.
    Form(MultipartPayload),
}

/// Fully resolved backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    /// Method to use.
    pub method: HttpMethod,
    /// Absolute backend URL including any query string.
    pub url: Url,
    /// Body to forward.
    pub body: BackendBody,
    /// Token forwarded as the `Authorization` header.
    pub token: Option<BearerToken>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Perform one call and decode the response envelope.
    async fn send(&self, request: BackendRequest) -> Result<Envelope<Value>, BackendApiError>;
}
