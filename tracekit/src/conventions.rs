//! # Span Conventions
//!
//! Fixed attribute keys and span type values shared by instrumentations so
//! that downstream consumers can rely on a stable vocabulary.
//!
//! ## Usage
//!
//! ```rust
//! use tracekit::conventions;
//! use tracekit::trace::{noop::NoopTracer, Span, SpanBuilder, Tracer};
//!
//! let tracer = NoopTracer::new();
//! let mut span = tracer
//!     .trace(SpanBuilder::from_name("web.request").with_span_type(conventions::SPAN_TYPE_HTTP))
//!     .unwrap();
//! span.set_tag(conventions::ERROR_TYPE, "TimeoutError");
//! ```

/// Attribute key holding the class or kind of a recorded exception.
pub const ERROR_TYPE: &str = "error.type";

/// Attribute key holding the message of a recorded exception.
pub const ERROR_MSG: &str = "error.msg";

/// Attribute key holding the backtrace of a recorded exception, when one was
/// captured.
pub const ERROR_STACK: &str = "error.stack";

/// Span type marking work performed while serving an HTTP request.
pub const SPAN_TYPE_HTTP: &str = "http";
