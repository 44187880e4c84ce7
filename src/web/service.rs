//! The single-endpoint HTTP boundary around [`MethodRouter`].

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::context::Context;
use crate::error::Error;
use crate::logging::RequestLog;
use crate::router::{MethodOutcome, MethodRouter};
use crate::status::StatusCode;

use super::RequestAdapter;

/// The only routed path, after trimming slashes.
pub const METHOD_PATH: &str = "method";

/// Header carrying the caller's request id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

const REDACTED: &str = "[REDACTED]";

/// A fully formed reply, ready for the transport to write out.
#[derive(Debug, Clone)]
pub struct HttpReply {
    /// HTTP status
    pub status: StatusCode,
    /// `{"code", "response"}` or `{"code", "error"}`
    pub body: Value,
    /// The call's context, with the final code and payload appended
    pub context: Context,
}

impl HttpReply {
    /// Returns the `Content-Type` of [`body_string`](Self::body_string).
    pub fn content_type(&self) -> &'static str {
        "application/json"
    }

    /// Serializes the body.
    pub fn body_string(&self) -> String {
        self.body.to_string()
    }
}

/// Decodes request bodies, routes them and turns every outcome into a reply.
///
/// Status mapping at this layer:
///
/// - body is not a JSON object: 400
/// - path other than `/method/`: 404
/// - panic while routing: 500, detail only in the log
/// - everything else: whatever the [`MethodRouter`] decided
///
/// # Examples
///
/// ```
/// use scoring_core::web::{RequestAdapter, ScoringService};
/// use scoring_core::{ServiceConfig, StatusCode};
///
/// let service = ScoringService::from_config(ServiceConfig::default());
///
/// let reply = service.handle(&RequestAdapter::new("/method/", "not json"));
/// assert_eq!(reply.status, StatusCode::BadRequest);
/// assert_eq!(reply.body_string(), r#"{"code":400,"error":"Bad Request"}"#);
/// ```
#[derive(Debug)]
pub struct ScoringService {
    router: MethodRouter,
}

impl ScoringService {
    /// Wraps a router.
    pub fn new(router: MethodRouter) -> Self {
        Self { router }
    }

    /// Builds the service with secrets taken from `config`.
    pub fn from_config(config: ServiceConfig) -> Self {
        Self::new(MethodRouter::from_config(config))
    }

    /// Returns the router.
    pub fn router(&self) -> &MethodRouter {
        &self.router
    }

    /// Handles one request as of now.
    pub fn handle(&self, request: &RequestAdapter) -> HttpReply {
        self.handle_at(request, Utc::now())
    }

    /// Handles one request as of `now`.
    pub fn handle_at(&self, request: &RequestAdapter, now: DateTime<Utc>) -> HttpReply {
        let mut context = Context::from_request_id(request.header(REQUEST_ID_HEADER));
        let outcome = self.respond(request, &mut context, now);
        context.record_reply(outcome.code, &outcome.payload);

        let log = RequestLog::new(context.request_id());
        match serde_json::to_string(&context) {
            Ok(line) => log.info(format_args!("{}", line)),
            Err(e) => log.warn(format_args!("context not serializable: {}", e)),
        }

        HttpReply {
            status: outcome.code,
            body: outcome.to_json(),
            context,
        }
    }

    fn respond(
        &self,
        request: &RequestAdapter,
        context: &mut Context,
        now: DateTime<Utc>,
    ) -> MethodOutcome {
        let log = RequestLog::new(context.request_id());

        let body = match decode_body(request) {
            Some(body) => body,
            None => return MethodOutcome::error(StatusCode::BadRequest, ""),
        };
        log.info(format_args!("{}: {}", request.path(), redact_token(&body)));

        if request.route() != METHOD_PATH {
            return MethodOutcome::error(StatusCode::NotFound, "");
        }

        match self.router.route(&body, context, now) {
            Ok(response) => MethodOutcome::ok(response),
            Err(e) => {
                if let Error::Internal(detail) = &e {
                    RequestLog::new(context.request_id())
                        .error(format_args!("Unexpected error: {}", detail));
                }
                e.into()
            }
        }
    }
}

/// Copy of the body fit for the log: the token is replaced.
fn redact_token(body: &Value) -> Value {
    let mut body = body.clone();
    if let Some(token) = body.get_mut("token") {
        *token = Value::String(REDACTED.to_string());
    }
    body
}

/// Decodes the tainted body; anything but a JSON object is malformed.
fn decode_body(request: &RequestAdapter) -> Option<Value> {
    serde_json::from_slice::<Value>(request.body().as_inner())
        .ok()
        .filter(Value::is_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> ScoringService {
        ScoringService::from_config(ServiceConfig::default())
    }

    #[test]
    fn malformed_bodies_are_400() {
        for body in ["", "{", "[1, 2]", "null", "\"text\"", "42"] {
            let reply = service().handle(&RequestAdapter::new("/method/", body));
            assert_eq!(reply.status, StatusCode::BadRequest, "{body:?}");
            assert_eq!(reply.body, json!({"code": 400, "error": "Bad Request"}));
        }
    }

    #[test]
    fn unknown_path_is_404() {
        let reply = service().handle(&RequestAdapter::new("/score/", "{}"));
        assert_eq!(reply.status, StatusCode::NotFound);
        assert_eq!(reply.body, json!({"code": 404, "error": "Not Found"}));
    }

    #[test]
    fn empty_object_is_422() {
        let reply = service().handle(&RequestAdapter::new("/method/", "{}"));
        assert_eq!(reply.status, StatusCode::InvalidRequest);
        assert_eq!(
            reply.body["error"],
            "login not exists; token not exists; arguments not exists; method not exists"
        );
    }

    #[test]
    fn request_id_header_is_propagated() {
        let mut adapter = RequestAdapter::new("/method/", "{}");
        adapter.add_header("x-request-id", "abc-123");

        let reply = service().handle(&adapter);

        assert_eq!(reply.context.request_id(), "abc-123");
        assert_eq!(reply.context.code(), Some(422));
    }

    #[test]
    fn logged_body_hides_the_token() {
        let body = json!({"login": "h&f", "token": "55cc9ce5", "method": "online_score"});
        let logged = redact_token(&body);

        assert_eq!(logged["token"], "[REDACTED]");
        assert_eq!(logged["login"], "h&f");
        assert!(!logged.to_string().contains("55cc9ce5"));
        assert_eq!(redact_token(&json!({"login": "x"})), json!({"login": "x"}));
    }

    #[test]
    fn token_never_reaches_the_log_output() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let body = r#"{"account": "a", "login": "b", "token": "deadbeefcafe",
                           "method": "online_score", "arguments": {}}"#;
            service().handle(&RequestAdapter::new("/method/", body));
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("/method/"));
        assert!(!output.contains("deadbeefcafe"));
    }

    #[test]
    fn reply_body_serializes() {
        let reply = service().handle(&RequestAdapter::new("/nope", "{}"));
        assert_eq!(reply.content_type(), "application/json");
        assert_eq!(reply.body_string(), r#"{"code":404,"error":"Not Found"}"#);
    }
}
