use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::router::Payload;
use crate::status::StatusCode;

/// Per-call observability record.
///
/// Handlers write what they saw (`has` for `online_score`, `nclients` for
/// `clients_interests`); the HTTP boundary appends the final code and payload
/// and hands the whole record to the log. A `Context` is never shared between
/// calls.
///
/// # Examples
///
/// ```
/// use scoring_core::Context;
///
/// let mut ctx = Context::new("req-123");
/// ctx.record_nclients(4);
///
/// assert_eq!(ctx.request_id(), "req-123");
/// assert_eq!(ctx.nclients(), Some(4));
/// assert!(ctx.has().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    has: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nclients: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Context {
    /// Creates a context for the given request id.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            has: None,
            nclients: None,
            code: None,
            response: None,
            error: None,
        }
    }

    /// Creates a context with a fresh random request id (32 hex characters).
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().simple().to_string())
    }

    /// Uses the caller's request id when one was supplied, otherwise generates one.
    pub fn from_request_id(request_id: Option<&str>) -> Self {
        match request_id.filter(|id| !id.is_empty()) {
            Some(id) => Self::new(id),
            None => Self::with_generated_id(),
        }
    }

    /// Returns the request id.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Records which `online_score` fields were sent non-empty.
    pub fn record_has<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.has = Some(fields.into_iter().map(Into::into).collect());
    }

    /// Records how many client ids were requested.
    pub fn record_nclients(&mut self, count: usize) {
        self.nclients = Some(count);
    }

    /// Appends the final status code and payload.
    pub fn record_reply(&mut self, code: StatusCode, payload: &Payload) {
        self.code = Some(code.as_u16());
        match payload {
            Payload::Response(value) => self.response = Some(value.clone()),
            Payload::Error(message) => self.error = Some(message.clone()),
        }
    }

    /// Returns the recorded non-empty fields.
    pub fn has(&self) -> Option<&[String]> {
        self.has.as_deref()
    }

    /// Returns the recorded client id count.
    pub fn nclients(&self) -> Option<usize> {
        self.nclients
    }

    /// Returns the final status code, once the reply was recorded.
    pub fn code(&self) -> Option<u16> {
        self.code
    }
}
