//! The uniform `{success, data, message, error}` wrapper.
//!
//! Every boundary speaks this shape: the backend answers the gateway with it,
//! and the gateway answers its callers with it. A read that succeeds carries
//! `data`; a failure carries a human-readable `error` or `message`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::Error;

/// Response envelope shared by the backend and the gateway.
///
/// # Examples
/// ```
/// use oncare_gateway::domain::Envelope;
/// use serde_json::json;
///
/// let envelope = Envelope::success("공지사항 조회 성공", Some(json!([])));
/// assert!(envelope.success);
/// let body = serde_json::to_value(&envelope).expect("serialise");
/// assert!(body.get("error").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    /// Whether the operation succeeded. Missing means failure.
    #[serde(default)]
    pub success: bool,
    /// Payload of a successful read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Confirmation or failure text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure text set by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful envelope with a fixed confirmation message.
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Failure envelope carrying only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    /// The most specific non-blank failure text: `error` first, then
    /// `message`.
    pub fn failure_message(&self) -> Option<&str> {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    }

    /// Unwrap the payload, or turn a failed envelope into an application
    /// error that falls back to `default_failure`.
    ///
    /// # Errors
    /// Returns [`Error`] with [`super::ErrorCode::Application`] when
    /// `success` is false.
    pub fn into_result(self, default_failure: &str) -> Result<Option<T>, Error> {
        if self.success {
            return Ok(self.data);
        }
        let message = self.failure_message().unwrap_or(default_failure).to_owned();
        Err(Error::application(message))
    }
}

impl Envelope<Value> {
    /// Decode `data` into a concrete type, keeping the rest of the envelope.
    ///
    /// # Errors
    /// Returns the serde error when `data` does not match `U`.
    pub fn into_typed<U: DeserializeOwned>(self) -> Result<Envelope<U>, serde_json::Error> {
        let data = self.data.map(serde_json::from_value).transpose()?;
        Ok(Envelope {
            success: self.success,
            data,
            message: self.message,
            error: self.error,
        })
    }
}

/// OpenAPI description of [`Envelope`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = Envelope)]
pub struct EnvelopeSchema {
    /// Whether the operation succeeded.
    #[schema(example = true)]
    pub success: bool,
    /// Payload of a successful read.
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
    /// Confirmation or failure text.
    #[schema(example = "공지사항 조회 성공")]
    pub message: Option<String>,
    /// Failure text set by the backend.
    pub error: Option<String>,
}
