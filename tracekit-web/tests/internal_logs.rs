use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use tracekit::testing::trace::TestTracer;
use tracekit::trace::TraceError;
use tracekit_web::{CompletionPayload, ControllerInstrumentation, RequestContext};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::Layer;

#[derive(Clone, Default)]
struct RecordingLayer {
    events: Arc<Mutex<Vec<(&'static str, &'static str)>>>,
}

impl RecordingLayer {
    // (name, target) pairs of every event seen.
    fn events(&self) -> Vec<(&'static str, &'static str)> {
        self.events.lock().unwrap().clone()
    }
}

impl<S> Layer<S> for RecordingLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let meta = event.metadata();
        self.events.lock().unwrap().push((meta.name(), meta.target()));
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<(&'static str, &'static str)> {
    let layer = RecordingLayer::default();
    let subscriber = Registry::default().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    layer.events()
}

#[test]
fn start_failures_are_logged_not_raised() {
    let tracer = TestTracer::new();
    let instr = ControllerInstrumentation::builder(tracer.clone()).build();
    let cx = RequestContext::new();
    tracer.fail_next_trace(TraceError::Unavailable("tracer offline".to_string()));

    let events = capture(|| instr.on_request_start(&cx));

    assert!(events
        .iter()
        .any(|(name, _)| *name == "ControllerInstrumentation.OnRequestStart.Error"));
    assert!(events.iter().all(|(_, target)| *target == "tracekit-web"));
    assert!(!cx.span_pending());
}

#[test]
fn completion_failures_are_logged_not_raised() {
    let tracer = TestTracer::new();
    let instr = ControllerInstrumentation::builder(tracer.clone()).build();
    let cx = RequestContext::new();
    let now = SystemTime::now();

    instr.on_request_start(&cx);
    // Missing route fields make classification fail after the span is found.
    let events = capture(|| instr.on_request_complete(&cx, now, now, &CompletionPayload::new()));

    assert!(events
        .iter()
        .any(|(name, _)| *name == "ControllerInstrumentation.OnRequestComplete.Error"));
    assert_eq!(tracer.started_spans()[0].data().finish_count, 1);
}

#[test]
fn successful_cycles_stay_quiet() {
    let tracer = TestTracer::new();
    let instr = ControllerInstrumentation::builder(tracer.clone()).build();
    let cx = RequestContext::new();
    let now = SystemTime::now();

    let payload = CompletionPayload::new()
        .with_controller("UsersController")
        .with_action("show")
        .with_status(200);
    let events = capture(|| {
        instr.on_request_start(&cx);
        instr.on_request_complete(&cx, now, now, &payload);
    });

    assert!(events.is_empty());
}
