use std::borrow::Cow;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::trace::{Span, SpanBuilder, SpanStatus, TraceError, TraceResult, Tracer};

/// An in-memory tracer that records every span it starts.
///
/// This tracer is useful for testing instrumentations. Started spans are
/// handed out as [`TestSpan`] handles backed by shared state, so everything an
/// instrumentation records stays inspectable from the test after the span has
/// finished. The tracer keeps an active-span stack: the most recently started
/// span that has not yet finished is the active one, and new spans start as
/// its children.
///
/// # Example
///
/// ```
/// use tracekit::testing::trace::TestTracer;
/// use tracekit::trace::{Span, SpanBuilder, SpanStatus, Tracer};
///
/// let tracer = TestTracer::new();
/// let mut span = tracer.trace(SpanBuilder::from_name("web.request")).unwrap();
/// span.set_status(SpanStatus::Error);
/// span.finish();
///
/// let spans = tracer.started_spans();
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].data().status, SpanStatus::Error);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TestTracer {
    state: Arc<Mutex<TracerState>>,
}

#[derive(Debug, Default)]
struct TracerState {
    active: Vec<TestSpan>,
    started: Vec<TestSpan>,
    next_failure: Option<TraceError>,
}

impl TestTracer {
    /// Create a new tracer with no recorded spans.
    pub fn new() -> Self {
        TestTracer::default()
    }

    /// Every span started through this tracer, in start order.
    ///
    /// Includes spans that have not finished yet.
    pub fn started_spans(&self) -> Vec<TestSpan> {
        self.state
            .lock()
            .expect("tracer state poisoned")
            .started
            .clone()
    }

    /// Arrange for the next call to [`Tracer::trace`] to fail with `err`.
    pub fn fail_next_trace(&self, err: TraceError) {
        self.state.lock().expect("tracer state poisoned").next_failure = Some(err);
    }

    /// Clears the recorded spans and the active stack.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("tracer state poisoned");
        state.active.clear();
        state.started.clear();
        state.next_failure = None;
    }
}

impl Tracer for TestTracer {
    type Span = TestSpan;

    fn trace(&self, builder: SpanBuilder) -> TraceResult<TestSpan> {
        let mut state = self.state.lock()?;
        if let Some(err) = state.next_failure.take() {
            return Err(err);
        }
        prune_finished(&mut state.active);
        let parent = state.active.last().cloned();
        let span = TestSpan::started(builder, parent);
        state.active.push(span.clone());
        state.started.push(span.clone());
        Ok(span)
    }

    fn active_span(&self) -> Option<TestSpan> {
        let mut state = self.state.lock().ok()?;
        prune_finished(&mut state.active);
        state.active.last().cloned()
    }
}

// Spans can finish through any handle, so the stack is repaired lazily on the
// next tracer call instead of eagerly on finish.
fn prune_finished(active: &mut Vec<TestSpan>) {
    while active.last().is_some_and(|span| span.is_finished()) {
        active.pop();
    }
}

/// A handle to a span started by a [`TestTracer`].
///
/// Cloning the handle does not copy the span: all clones share the same
/// underlying data, mirroring how tracer backends hand out references to one
/// logical span.
#[derive(Clone, Debug)]
pub struct TestSpan {
    data: Arc<Mutex<TestSpanData>>,
}

impl TestSpan {
    fn started(builder: SpanBuilder, parent: Option<TestSpan>) -> Self {
        TestSpan {
            data: Arc::new(Mutex::new(TestSpanData {
                name: builder.name,
                service: builder.service,
                span_type: builder.span_type,
                parent,
                ..Default::default()
            })),
        }
    }

    /// A snapshot of everything recorded on this span so far.
    pub fn data(&self) -> TestSpanData {
        self.data.lock().expect("span data poisoned").clone()
    }

    /// Whether a finish method has been called at least once.
    pub fn is_finished(&self) -> bool {
        self.with_data(|data| data.finish_count > 0)
    }

    fn with_data<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TestSpanData) -> R,
    {
        f(&mut self.data.lock().expect("span data poisoned"))
    }
}

impl Span for TestSpan {
    fn name(&self) -> Cow<'static, str> {
        self.with_data(|data| data.name.clone())
    }

    fn parent(&self) -> Option<TestSpan> {
        self.with_data(|data| data.parent.clone())
    }

    fn set_resource<T>(&mut self, resource: T)
    where
        T: Into<Cow<'static, str>>,
    {
        let resource = resource.into();
        self.with_data(|data| data.resource = Some(resource));
    }

    fn set_tag<T>(&mut self, key: &'static str, value: T)
    where
        T: Into<String>,
    {
        let value = value.into();
        self.with_data(|data| data.tags.push((key, value)));
    }

    fn set_status(&mut self, status: SpanStatus) {
        self.with_data(|data| data.status = status);
    }

    fn set_start_time(&mut self, timestamp: SystemTime) {
        self.with_data(|data| data.start_time = Some(timestamp));
    }

    fn finish_with_timestamp(&mut self, timestamp: SystemTime) {
        self.with_data(|data| {
            data.finish_count += 1;
            if data.end_time.is_none() {
                data.end_time = Some(timestamp);
            }
        });
    }
}

/// A snapshot of the data recorded on a [`TestSpan`].
#[derive(Clone, Debug, Default)]
pub struct TestSpanData {
    /// The name the span was started with.
    pub name: Cow<'static, str>,

    /// The service from the span builder, if any.
    pub service: Option<Cow<'static, str>>,

    /// The span type from the span builder, if any.
    pub span_type: Option<Cow<'static, str>>,

    /// The most recently set resource, if any.
    pub resource: Option<Cow<'static, str>>,

    /// Every tag set on the span, in set order.
    pub tags: Vec<(&'static str, String)>,

    /// The most recently set status.
    pub status: SpanStatus,

    /// The start time override, if one was set.
    pub start_time: Option<SystemTime>,

    /// The end time recorded by the first finish call, if any.
    pub end_time: Option<SystemTime>,

    /// How many times a finish method was called on the span.
    pub finish_count: usize,

    /// The span this one was started under, if any.
    pub parent: Option<TestSpan>,
}

impl TestSpanData {
    /// The value of the last tag set under `key`, if any.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .rev()
            .find(|(tag_key, _)| *tag_key == key)
            .map(|(_, value)| value.as_str())
    }
}
