//! HTTP boundary surface.
//!
//! This module sits between a transport (any HTTP server) and the validation
//! core. It handles:
//! - Mapping a transport request to a [`RequestAdapter`]
//! - Keeping the raw body tainted until it is decoded and validated
//! - Request-id extraction (`X-Request-Id`) or generation
//! - Turning every outcome, including malformed bodies and panics, into one
//!   JSON reply
//! - Logging the request and the final call context
//!
//! It contains no transport code: the socket listener, TLS and command-line
//! options belong to the embedding binary.
//!
//! # Example Flow
//!
//! ```
//! use scoring_core::web::{RequestAdapter, ScoringService};
//! use scoring_core::{ServiceConfig, StatusCode};
//!
//! // Built once at startup and shared by every request
//! let service = ScoringService::from_config(ServiceConfig::from_env());
//!
//! // Per request: adapt, handle, write out `reply.body_string()`
//! let mut adapter = RequestAdapter::new(
//!     "/method/",
//!     r#"{"account": "horns&hoofs", "login": "h&f", "method": "online_score",
//!         "token": "bad", "arguments": {}}"#,
//! );
//! adapter.add_header("X-Request-Id", "req-1");
//!
//! let reply = service.handle(&adapter);
//! assert_eq!(reply.status, StatusCode::Forbidden);
//! assert_eq!(reply.context.request_id(), "req-1");
//! ```

mod adapter;
mod service;

pub use adapter::RequestAdapter;
pub use service::{HttpReply, ScoringService, METHOD_PATH, REQUEST_ID_HEADER};
