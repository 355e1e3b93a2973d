//! # No-op trace impl
//!
//! This implementation is useful when tracing is disabled, for example via
//! configuration. It is also useful for testing purposes as it is intended to
//! have minimal resource utilization and runtime impact.
use std::borrow::Cow;
use std::time::SystemTime;

use crate::trace::{Span, SpanBuilder, SpanStatus, TraceResult, Tracer};

/// A no-op instance of a [`Tracer`].
///
/// Spans started through it are accepted and discarded, and
/// [`Tracer::active_span`] always reports that nothing is in flight.
#[derive(Clone, Debug, Default)]
pub struct NoopTracer {
    _private: (),
}

impl NoopTracer {
    /// Create a new no-op tracer
    pub fn new() -> Self {
        NoopTracer { _private: () }
    }
}

impl Tracer for NoopTracer {
    type Span = NoopSpan;

    fn trace(&self, _builder: SpanBuilder) -> TraceResult<NoopSpan> {
        Ok(NoopSpan::new())
    }

    fn active_span(&self) -> Option<NoopSpan> {
        None
    }
}

/// A no-op instance of a [`Span`].
#[derive(Clone, Debug, Default)]
pub struct NoopSpan {
    _private: (),
}

impl NoopSpan {
    /// Create a new no-op span
    pub fn new() -> Self {
        NoopSpan { _private: () }
    }
}

impl Span for NoopSpan {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("")
    }

    fn parent(&self) -> Option<NoopSpan> {
        None
    }

    fn set_resource<T>(&mut self, _resource: T)
    where
        T: Into<Cow<'static, str>>,
    {
        // Ignored
    }

    fn set_tag<T>(&mut self, _key: &'static str, _value: T)
    where
        T: Into<String>,
    {
        // Ignored
    }

    fn set_status(&mut self, _status: SpanStatus) {
        // Ignored
    }

    fn set_start_time(&mut self, _timestamp: SystemTime) {
        // Ignored
    }

    fn finish_with_timestamp(&mut self, _timestamp: SystemTime) {
        // Ignored
    }
}
