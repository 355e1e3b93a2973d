//! The `trace` module includes types for tracking the progression of a single
//! request while it is handled by the components that make up an application.
//! A trace is a tree of [`Span`]s, objects that represent the work being done
//! by individual components involved in a request as it flows through a
//! system.
//!
//! ## Overview
//!
//! The tracing API consists of two main traits:
//!
//! * [`Tracer`]s are responsible for starting `Span`s and tracking which one
//!   is currently active.
//! * [`Span`]s provide the API to describe an operation: its resource, tags,
//!   status and timestamps.
//!
//! Tracer backends live outside this crate and plug in by implementing both
//! traits. The [`noop`] module ships an inert implementation for disabled
//! tracing, and the `testing` module (cargo feature `testing`) ships an
//! in-memory one that records everything for inspection.
//!
//! ## Getting Started
//!
//! ```
//! use tracekit::trace::{noop::NoopTracer, Span, SpanBuilder, Tracer};
//!
//! fn handle_request<T: Tracer>(tracer: &T) {
//!     let span = tracer.trace(SpanBuilder::from_name("web.request"));
//!
//!     // Do work...
//!
//!     if let Ok(mut span) = span {
//!         span.finish();
//!     }
//! }
//!
//! handle_request(&NoopTracer::new());
//! ```

mod error;
pub mod noop;
mod span;
mod tracer;

pub use self::error::{TraceError, TraceResult};
pub use self::span::{ExceptionInfo, Span, SpanStatus};
pub use self::tracer::{SpanBuilder, Tracer};
