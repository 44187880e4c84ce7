//! Method routing: the fixed validate / authenticate / resolve / dispatch order.
//!
//! [`MethodRouter::handle`] is the core's single entry point. Every call ends in
//! exactly one [`MethodOutcome`]:
//! - envelope invalid: 422 with the joined validation errors
//! - token mismatch: 403
//! - unknown method: 404
//! - arguments invalid: 422
//! - panic in validation or a handler: 500, generic text only
//! - otherwise the handler's response with 200

use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::context::Context;
use crate::envelope::MethodRequest;
use crate::error::{Error, RouteError};
use crate::methods;
use crate::requests::{ClientsInterestsRequest, OnlineScoreRequest};
use crate::status::StatusCode;

/// The routing table: every method the service answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `online_score`
    OnlineScore,
    /// `clients_interests`
    ClientsInterests,
}

impl Method {
    /// All routable methods.
    pub const ALL: [Method; 2] = [Method::OnlineScore, Method::ClientsInterests];

    /// Returns the wire name.
    pub fn name(self) -> &'static str {
        match self {
            Method::OnlineScore => "online_score",
            Method::ClientsInterests => "clients_interests",
        }
    }
}

impl FromStr for Method {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| RouteError::new(s))
    }
}

/// What a call hands back to the boundary: a response or an error text.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Method result, serialized under `response`
    Response(Value),
    /// Error text, serialized under `error`
    Error(String),
}

/// The single `(payload, status)` pair every call terminates with.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodOutcome {
    /// Status code
    pub code: StatusCode,
    /// Response or error payload
    pub payload: Payload,
}

impl MethodOutcome {
    /// A successful outcome.
    pub fn ok(response: Value) -> Self {
        Self {
            code: StatusCode::Ok,
            payload: Payload::Response(response),
        }
    }

    /// A failed outcome with an explicit error text.
    ///
    /// An empty text falls back to the status' reason phrase.
    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            code.reason().to_string()
        } else {
            message
        };
        Self {
            code,
            payload: Payload::Error(message),
        }
    }

    /// Renders `{"code": .., "response": ..}` or `{"code": .., "error": ..}`.
    pub fn to_json(&self) -> Value {
        match &self.payload {
            Payload::Response(response) => json!({
                "code": self.code.as_u16(),
                "response": response,
            }),
            Payload::Error(error) => json!({
                "code": self.code.as_u16(),
                "error": error,
            }),
        }
    }
}

impl From<Error> for MethodOutcome {
    fn from(e: Error) -> Self {
        MethodOutcome::error(e.status(), e.public_message())
    }
}

/// Validates, authenticates and dispatches a decoded request body.
///
/// The order is fixed and each step runs only if the previous one passed:
///
/// ```text
/// envelope invalid  -> 422
/// token mismatch    -> 403
/// method unknown    -> 404
/// arguments invalid -> 422
/// handler           -> 200
/// ```
///
/// # Examples
///
/// ```
/// use scoring_core::{Context, MethodRouter, ServiceConfig, StatusCode};
/// use serde_json::json;
///
/// let router = MethodRouter::from_config(ServiceConfig::default());
/// let mut ctx = Context::new("req-1");
///
/// let outcome = router.handle(
///     &json!({"login": "h&f", "token": "bad", "method": "online_score", "arguments": {}}),
///     &mut ctx,
/// );
/// assert_eq!(outcome.code, StatusCode::Forbidden);
/// ```
#[derive(Debug)]
pub struct MethodRouter {
    auth: Authenticator,
}

impl MethodRouter {
    /// Creates a router around an authenticator.
    pub fn new(auth: Authenticator) -> Self {
        Self { auth }
    }

    /// Creates a router with secrets taken from `config`.
    pub fn from_config(config: ServiceConfig) -> Self {
        Self::new(Authenticator::new(config))
    }

    /// Returns the authenticator.
    pub fn authenticator(&self) -> &Authenticator {
        &self.auth
    }

    /// Handles one call as of now.
    pub fn handle(&self, body: &Value, ctx: &mut Context) -> MethodOutcome {
        self.handle_at(body, ctx, Utc::now())
    }

    /// Handles one call as of `now` (admin token hour and birthday ages).
    pub fn handle_at(&self, body: &Value, ctx: &mut Context, now: DateTime<Utc>) -> MethodOutcome {
        match self.route(body, ctx, now) {
            Ok(response) => MethodOutcome::ok(response),
            Err(e) => e.into(),
        }
    }

    /// Runs the call and returns the first applicable error.
    ///
    /// A panic anywhere in validation or in a handler is caught here and
    /// surfaces as [`Error::Internal`]; it never unwinds into the caller.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the envelope or the arguments are invalid
    /// - [`Error::Auth`] if the token does not match
    /// - [`Error::Route`] if the method is unknown
    /// - [`Error::Internal`] if validation or the handler panicked
    pub fn route(
        &self,
        body: &Value,
        ctx: &mut Context,
        now: DateTime<Utc>,
    ) -> Result<Value, Error> {
        catch_panic(|| self.run(body, ctx, now))
    }

    fn run(&self, body: &Value, ctx: &mut Context, now: DateTime<Utc>) -> Result<Value, Error> {
        let request = MethodRequest::new(body);
        if !request.record().is_valid() {
            return Err(Error::Validation(request.record().get_errors()));
        }

        self.auth.check_at(&request, now)?;

        let method: Method = request.method().parse()?;
        self.dispatch(method, &request, ctx, now)
    }

    fn dispatch(
        &self,
        method: Method,
        request: &MethodRequest,
        ctx: &mut Context,
        now: DateTime<Utc>,
    ) -> Result<Value, Error> {
        let today = now.date_naive();
        match method {
            Method::OnlineScore => {
                let arguments = OnlineScoreRequest::new_on(request.arguments(), today);
                if !arguments.record().is_valid() {
                    return Err(Error::Validation(arguments.record().get_errors()));
                }
                Ok(methods::online_score(&arguments, self.auth.is_admin(request), ctx))
            }
            Method::ClientsInterests => {
                let arguments = ClientsInterestsRequest::new_on(request.arguments(), today);
                if !arguments.record().is_valid() {
                    return Err(Error::Validation(arguments.record().get_errors()));
                }
                Ok(methods::clients_interests(&arguments, ctx))
            }
        }
    }
}

/// Runs `f`, turning a panic into [`Error::Internal`] carrying the panic message.
fn catch_panic<F>(f: F) -> Result<Value, Error>
where
    F: FnOnce() -> Result<Value, Error>,
{
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|cause| {
        let detail = cause
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| cause.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(Error::Internal(detail))
    })
}
