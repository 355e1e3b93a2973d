//! # Web Controller Instrumentation
//!
//! An instrumentation that turns a web framework's controller notifications
//! into finished trace spans.
//!
//! Frameworks with a notification bus announce controller work twice: once
//! when a request reaches the controller layer ([`START_PROCESSING_EVENT`])
//! and once when the controller has produced a response
//! ([`PROCESS_ACTION_EVENT`]), the latter carrying the routing data, the
//! response status and the request timing. The two events are decoupled, and
//! the instrumentation splits accordingly:
//!
//! - [`ControllerInstrumentation::on_request_start`] opens the controller
//!   span and latches the request's [`RequestContext`] as pending.
//! - [`ControllerInstrumentation::on_request_complete`] takes the latch,
//!   classifies the outcome from the [`CompletionPayload`] onto the still
//!   active span, and closes it over the request window the framework
//!   reported.
//!
//! The bus itself stays out of scope: adapters subscribe the two handlers to
//! the channels named by [`START_PROCESSING_EVENT`] and
//! [`PROCESS_ACTION_EVENT`] with whatever dispatch mechanism the application
//! uses.
//!
//! ## Resources
//!
//! Controller spans all share one name, [`CONTROLLER_SPAN_NAME`]. What
//! distinguishes one endpoint from another is the span *resource*, derived
//! fresh on every completion as `<controller>#<action>`. When the controller
//! span sits directly under the transport-level request span (named
//! [`REQUEST_SPAN_NAME`]), that parent's resource is rewritten to the same
//! value so both levels of the trace group under the routed endpoint.
//!
//! ## Outcome classification
//!
//! A reported status marks the span as failed exactly when its string form
//! begins with `'5'`; anything else, including the unknown-status sentinel
//! [`HttpStatus::UNKNOWN`], leaves the span status untouched. A reported
//! exception is always recorded on the span, but it marks the span failed
//! only when the configured [`ExceptionStatusResolver`] maps it to a 5xx
//! status; [`FallbackStatusResolver`] maps everything to `500`. A request
//! failing with a client-side status such as 404 is not an error of the
//! controller span.
//!
//! ## Never disturb the request
//!
//! Both handlers swallow every instrumentation failure: problems are logged
//! through the internal diagnostics and discarded. A broken tracer must not
//! break the application serving the request.
//!
//! ## Kitchen Sink Full Configuration
//!
//! Example showing how to override all configuration options. See the
//! [`ControllerInstrumentation`] docs for details of each option.
//!
//! ```
//! use std::time::{Duration, SystemTime};
//!
//! use tracekit::trace::{noop::NoopTracer, ExceptionInfo};
//! use tracekit_web::{
//!     CompletionPayload, Config, ControllerInstrumentation, ExceptionStatusResolver,
//!     HttpStatus, RequestContext,
//! };
//!
//! #[derive(Debug)]
//! struct RoutingAwareResolver;
//!
//! impl ExceptionStatusResolver for RoutingAwareResolver {
//!     fn resolve(&self, exception: &ExceptionInfo) -> Option<HttpStatus> {
//!         match exception.kind.as_ref() {
//!             "RoutingError" => Some(HttpStatus::from("404")),
//!             "TimeoutError" => Some(HttpStatus::from("503")),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let instrumentation = ControllerInstrumentation::builder(NoopTracer::new())
//!     .with_config(Config::default().with_service("billing"))
//!     .with_status_resolver(RoutingAwareResolver)
//!     .build();
//!
//! let cx = RequestContext::new();
//! instrumentation.on_request_start(&cx);
//!
//! let start = SystemTime::now();
//! let finish = start + Duration::from_millis(35);
//! let payload = CompletionPayload::new()
//!     .with_controller("InvoicesController")
//!     .with_action("show")
//!     .with_exception(ExceptionInfo::new("TimeoutError", "upstream billing timed out"));
//! instrumentation.on_request_complete(&cx, start, finish, &payload);
//! ```
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(
    docsrs,
    feature(doc_cfg, doc_auto_cfg),
    deny(rustdoc::broken_intra_doc_links)
)]
#![cfg_attr(test, deny(warnings))]

mod config;
mod context;
mod controller;
mod payload;
mod resolver;

pub use config::{Config, DEFAULT_SERVICE_NAME};
pub use context::RequestContext;
pub use controller::{
    ControllerInstrumentation, ControllerInstrumentationBuilder, CONTROLLER_SPAN_NAME,
    PROCESS_ACTION_EVENT, REQUEST_SPAN_NAME, START_PROCESSING_EVENT, WEB_ROUTE_ACTION,
    WEB_ROUTE_CONTROLLER,
};
pub use payload::{resource_identifier, CompletionPayload, HttpStatus};
pub use resolver::{ExceptionStatusResolver, FallbackStatusResolver, FALLBACK_ERROR_STATUS};

use thiserror::Error;
use tracekit::trace::TraceError;

/// Errors raised by the instrumentation handlers.
///
/// These never reach the instrumented application: the handlers log them
/// through the internal diagnostics and discard them.
#[derive(Debug, Error)]
pub enum Error {
    /// The completion payload is missing a field required at this point
    #[error("completion payload is missing required field `{0}`")]
    MissingField(&'static str),
    /// The tracer failed
    #[error(transparent)]
    Trace(#[from] TraceError),
}
