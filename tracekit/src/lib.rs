//! Tracer and span API for request-scoped instrumentation.
//!
//! *[Supported Rust Versions](#supported-rust-versions)*
//!
//! # Overview
//!
//! This crate is the foundation for wiring web-framework instrumentations to
//! a tracer backend. It defines the traits instrumentations program against,
//! without itself implementing span collection, processing or export:
//!
//! - **[`trace`]**: the [`Tracer`](trace::Tracer) and [`Span`](trace::Span)
//!   traits, the [`SpanBuilder`](trace::SpanBuilder) options carrier, span
//!   status and exception payloads, and the error surface shared with tracer
//!   implementations.
//! - **[`conventions`]**: fixed tag keys and span type values that give
//!   recorded spans a stable vocabulary across instrumentations.
//!
//! This separation of concerns allows instrumentation authors to depend on
//! this crate *only*, while applications light up the pipeline by plugging in
//! a concrete tracer backend. The [`trace::noop`] module ships an inert
//! tracer for disabled tracing, and the `testing` module (cargo feature
//! `testing`) an in-memory recording one for tests.
//!
//! # Getting Started
//!
//! ```
//! use tracekit::trace::{noop::NoopTracer, Span, SpanBuilder, Tracer};
//!
//! fn do_something<T: Tracer>(tracer: &T) {
//!     if let Ok(mut span) = tracer.trace(SpanBuilder::from_name("my_operation")) {
//!         // Traced work here...
//!         span.finish();
//!     }
//! }
//!
//! do_something(&NoopTracer::new());
//! ```
//!
//! # Crate Feature Flags
//!
//! The following crate feature flags are available:
//!
//! * `internal-logs`: Emits self-diagnostics of the instrumentation machinery
//!   through the [tracing](https://crates.io/crates/tracing) crate. Enabled by
//!   default.
//! * `testing`: Exposes an in-memory tracer that records every span for
//!   inspection from tests. Disabled by default.
//!
//! # Supported Rust Versions
//!
//! This crate is built against the latest stable release. The minimum
//! supported version is 1.75. The current version is not guaranteed to build
//! on Rust versions earlier than the minimum supported version.
//!
//! The current stable Rust compiler and the three most recent minor versions
//! before it will always be supported. Increasing the minimum supported
//! compiler version is not considered a semver breaking change as long as
//! doing so complies with this policy.
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

pub mod conventions;

mod internal_logging;

#[cfg(any(feature = "testing", test))]
#[doc(hidden)]
pub mod testing;

pub mod trace;

#[doc(hidden)]
pub mod time {
    use std::time::SystemTime;

    #[doc(hidden)]
    pub fn now() -> SystemTime {
        SystemTime::now()
    }
}

#[doc(hidden)]
#[cfg(feature = "internal-logs")]
pub mod _private {
    pub use tracing::{debug, error, info, warn};
}
