//! Declarative request validation and method dispatch for a scoring API.
//!
//! Callers POST a single JSON envelope naming a method; this crate validates
//! it, authenticates the caller and dispatches to the method's handler:
//! - **Field descriptors**: typed rules (required / nullable / kind predicate)
//! - **Schemas**: static, ordered `(name, descriptor)` tables, one per record type
//! - **Validated records**: field-level checks, then record-level invariants,
//!   with every error collected before deciding validity
//! - **Authentication**: SHA-512 token digests, with a separate admin formula
//! - **Routing**: envelope validity, then auth, then method lookup, then
//!   argument validity, each mapped to one status code
//!
//! # Core Types
//!
//! - [`FieldDescriptor`]: A reusable validation rule bound to one field
//! - [`Schema`]: The ordered set of descriptors of a record type
//! - [`ValidatedRecord`]: Raw input, parsed values and accumulated errors
//! - [`MethodRequest`]: The outer call envelope
//! - [`Authenticator`]: Token digest check with injected secrets
//! - [`MethodRouter`]: Fixed-order validate / authenticate / dispatch
//! - [`Context`]: Per-call observability record
//!
//! # Examples
//!
//! ```
//! use scoring_core::{Context, MethodRouter, ServiceConfig, StatusCode};
//! use serde_json::json;
//!
//! let router = MethodRouter::from_config(ServiceConfig::default());
//! let mut ctx = Context::with_generated_id();
//!
//! let outcome = router.handle(
//!     &json!({
//!         "account": "horns&hoofs",
//!         "login": "h&f",
//!         "method": "online_score",
//!         "token": "55cc9ce545bcd144300fe9efc28e65d415b923ebb6be1e19d2750a2c03e80dd209a27954dca045e5bb12418e7d89b6d718a9e35af34e14e1d5bcd5a08f21fc95",
//!         "arguments": {"phone": "79175002040", "email": "stupnikov@otus.ru"},
//!     }),
//!     &mut ctx,
//! );
//!
//! assert_eq!(outcome.code, StatusCode::Ok);
//! assert_eq!(outcome.to_json(), json!({"code": 200, "response": {"score": 3.0}}));
//! assert_eq!(ctx.has().unwrap(), ["email", "phone"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod context;
mod envelope;
mod error;
pub mod field;
mod logging;
pub mod methods;
pub mod record;
pub mod requests;
mod router;
pub mod schema;
mod secret;
mod status;
mod tainted;
pub mod web;

pub use auth::{Authenticator, ADMIN_HOUR_FORMAT};
pub use config::{ServiceConfig, ENV_ADMIN_LOGIN, ENV_ADMIN_SALT, ENV_SALT};
pub use context::Context;
pub use envelope::MethodRequest;
pub use error::{AuthError, Error, FieldError, FieldErrorKind, RouteError};
pub use field::{FieldDescriptor, FieldKind, FieldValue, Gender};
pub use logging::RequestLog;
pub use record::ValidatedRecord;
pub use requests::{ClientsInterestsRequest, OnlineScoreRequest};
pub use router::{Method, MethodOutcome, MethodRouter, Payload};
pub use schema::{RecordCheck, Schema};
pub use secret::Secret;
pub use status::StatusCode;
pub use tainted::Tainted;
