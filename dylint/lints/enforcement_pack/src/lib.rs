//! Enforcement pack: custom lints for scoring-core.
//!
//! Every request line goes through `RequestLog` so it carries the request id,
//! and the service salts never reach a terminal unredacted.
//!
//! ## Implemented Lints
//!
//! - `NO_PRINTLN`: Forbids `println!`, `eprintln!` and `dbg!` in library code.

#![feature(rustc_private)]
#![warn(unused_extern_crates)]

extern crate rustc_ast;
extern crate rustc_lint;
extern crate rustc_session;
extern crate rustc_span;

use rustc_ast::{Expr, ExprKind, MacCall};
use rustc_lint::{EarlyContext, EarlyLintPass};
use rustc_session::{declare_lint_pass, declare_tool_lint};

declare_tool_lint! {
    /// **What it does:** Forbids `println!`, `eprintln!` and `dbg!` in library code.
    ///
    /// **Why is this bad?** Output written straight to stdout/stderr:
    /// - has no request id, so it cannot be joined with the call's context line
    /// - skips the `tracing` subscriber the embedding binary installed
    /// - may print a `ServiceConfig` or raw request body, salts and tokens included
    ///
    /// **Known problems:** None.
    ///
    /// **Example:**
    /// ```rust,ignore
    /// // Bad
    /// println!("{}: {}", path, body);
    /// dbg!(&config);
    ///
    /// // Good
    /// use scoring_core::RequestLog;
    /// RequestLog::new(context.request_id()).info(format_args!("{}: {}", path, body));
    /// ```
    pub enforcement_pack::NO_PRINTLN,
    Deny,
    "use of println!, eprintln!, or dbg! macros; use RequestLog instead"
}

declare_lint_pass!(NoPrintln => [NO_PRINTLN]);

impl EarlyLintPass for NoPrintln {
    fn check_expr(&mut self, cx: &EarlyContext<'_>, expr: &Expr) {
        if let ExprKind::MacCall(mac) = &expr.kind {
            check_macro(cx, mac, expr.span);
        }
    }
}

fn check_macro(cx: &EarlyContext<'_>, mac: &MacCall, span: rustc_span::Span) {
    let path = &mac.path;

    // Only bare `println!(..)`; `std::println!` paths are not used in this crate
    if path.segments.len() != 1 {
        return;
    }

    let macro_name = path.segments[0].ident.name.as_str();

    match macro_name {
        "println" => {
            rustc_lint::LintContext::span_lint(cx, NO_PRINTLN, span, |diag| {
                diag.help("use `RequestLog::info` so the line carries the request id");
                diag.note("`println!` skips the tracing subscriber and may print salts or tokens");
            });
        }
        "eprintln" => {
            rustc_lint::LintContext::span_lint(cx, NO_PRINTLN, span, |diag| {
                diag.help("use `RequestLog::error` so the line carries the request id");
                diag.note("`eprintln!` skips the tracing subscriber and may print salts or tokens");
            });
        }
        "dbg" => {
            rustc_lint::LintContext::span_lint(cx, NO_PRINTLN, span, |diag| {
                diag.help("use `tracing::debug!` inside a request span instead");
                diag.note("`dbg!` prints the full `Debug` form, raw request bodies included");
            });
        }
        _ => {}
    }
}

#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn register_lints(_sess: &rustc_session::Session, lint_store: &mut rustc_lint::LintStore) {
    lint_store.register_lints(&[&NO_PRINTLN]);
    lint_store.register_early_pass(|| Box::new(NoPrintln));
}

#[unsafe(no_mangle)]
pub fn dylint_version() -> *mut std::os::raw::c_char {
    std::ffi::CString::new(dylint_linting::DYLINT_VERSION)
        .expect("version string contains null byte")
        .into_raw()
}
