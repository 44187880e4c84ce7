use std::fmt;

use crate::status::StatusCode;

/// Errors surfaced by the method router.
///
/// Each variant corresponds to one terminal state of a call and maps to a
/// single status code via [`Error::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The envelope or the method arguments failed validation
    Validation(String),
    /// The supplied token did not match the expected digest
    Auth(AuthError),
    /// The method name is not in the routing table
    Route(RouteError),
    /// Validation or a handler panicked; carries the panic message for the log
    Internal(String),
}

impl Error {
    /// Returns the status code this error terminates the call with.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::InvalidRequest,
            Error::Auth(_) => StatusCode::Forbidden,
            Error::Route(_) => StatusCode::NotFound,
            Error::Internal(_) => StatusCode::InternalError,
        }
    }

    /// Returns the text placed in the `error` member of the reply.
    ///
    /// Authentication and routing failures never carry detail; internal
    /// failures are reported with the generic reason phrase only.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(errors) => errors.clone(),
            other => other.status().reason().to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(errors) => write!(f, "validation failed: {}", errors),
            Error::Auth(e) => write!(f, "{}", e),
            Error::Route(e) => write!(f, "{}", e),
            Error::Internal(detail) => write!(f, "internal error: {}", detail),
        }
    }
}

impl std::error::Error for Error {}

impl From<AuthError> for Error {
    fn from(e: AuthError) -> Self {
        Error::Auth(e)
    }
}

impl From<RouteError> for Error {
    fn from(e: RouteError) -> Self {
        Error::Route(e)
    }
}

/// A single field's raw value failed its descriptor's contract.
///
/// The message is fixed per field kind; the field name is attached by the
/// record pipeline when the error is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    kind: FieldErrorKind,
    message: &'static str,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(kind: FieldErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> FieldErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for FieldError {}

/// Why a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Required field absent from the input.
    Missing,
    /// Present but empty while the descriptor is not nullable.
    Empty,
    /// Present with a value that fails the kind's predicate.
    Invalid,
}

/// The supplied token does not authenticate the caller.
///
/// Deliberately carries no detail: a bad token and a bad login look the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthError;

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("authentication failed")
    }
}

impl std::error::Error for AuthError {}

/// The envelope named a method the router does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteError {
    /// The method name as supplied by the caller
    pub method: String,
}

impl RouteError {
    /// Creates a routing error for the given method name.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown method '{}'", self.method)
    }
}

impl std::error::Error for RouteError {}
