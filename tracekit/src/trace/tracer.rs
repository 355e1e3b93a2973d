use std::borrow::Cow;

use crate::trace::{Span, TraceResult};

/// Interface for starting and activating [`Span`]s.
///
/// Starting a span also makes it the *active* span of the tracer's current
/// execution context: until it finishes, spans started afterwards become its
/// children, and [`Tracer::active_span`] hands out a handle to it. This is the
/// seam decoupled instrumentations rely on when the code that opens a span is
/// not the code that finalizes it.
///
/// # Examples
///
/// ```
/// use tracekit::trace::{noop::NoopTracer, Span, SpanBuilder, Tracer};
///
/// let tracer = NoopTracer::new();
/// let mut span = tracer.trace(
///     SpanBuilder::from_name("web.controller")
///         .with_service("billing")
///         .with_span_type("http"),
/// )?;
/// span.finish();
/// # Ok::<(), tracekit::trace::TraceError>(())
/// ```
pub trait Tracer {
    /// The `Span` type produced by this tracer.
    type Span: Span;

    /// Start a new span from the given builder and make it the active span.
    ///
    /// The new span is a child of the previously active span, if one exists.
    /// Errors signal that the tracer could not start a span at all, for
    /// example because it has shut down; callers that must not disturb the
    /// instrumented request are expected to catch them.
    fn trace(&self, builder: SpanBuilder) -> TraceResult<Self::Span>;

    /// The currently active span, if any.
    ///
    /// Returns `None` when no span has been started or every started span has
    /// already finished.
    fn active_span(&self) -> Option<Self::Span>;
}

/// Options carrier for [`Tracer::trace`].
///
/// The name is the only required value; everything else is optional and
/// tracer implementations fall back to their own defaults.
#[derive(Clone, Debug, Default)]
pub struct SpanBuilder {
    /// The span name.
    pub name: Cow<'static, str>,

    /// The service the span is reported under.
    pub service: Option<Cow<'static, str>>,

    /// The type classification of the span's workload, e.g. `http`.
    pub span_type: Option<Cow<'static, str>>,
}

impl SpanBuilder {
    /// Create a builder for a span with the given name.
    pub fn from_name<T: Into<Cow<'static, str>>>(name: T) -> Self {
        SpanBuilder {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Specify the service the span is reported under.
    pub fn with_service<T: Into<Cow<'static, str>>>(self, service: T) -> Self {
        SpanBuilder {
            service: Some(service.into()),
            ..self
        }
    }

    /// Specify the span type.
    pub fn with_span_type<T: Into<Cow<'static, str>>>(self, span_type: T) -> Self {
        SpanBuilder {
            span_type: Some(span_type.into()),
            ..self
        }
    }
}
