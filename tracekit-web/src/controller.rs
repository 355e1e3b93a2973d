use std::time::SystemTime;

use tracekit::trace::{Span, SpanBuilder, SpanStatus, Tracer};
use tracekit::{conventions, tracekit_debug, tracekit_error};

use crate::config::Config;
use crate::context::RequestContext;
use crate::payload::{resource_identifier, CompletionPayload, HttpStatus};
use crate::resolver::{ExceptionStatusResolver, FallbackStatusResolver};
use crate::Error;

/// Name of every controller span opened by the instrumentation.
pub const CONTROLLER_SPAN_NAME: &str = "web.controller";

/// Name identifying the transport-level request span.
///
/// When the controller span's direct parent carries this name, the parent's
/// resource is rewritten to the routed endpoint so both levels of the trace
/// group under it.
pub const REQUEST_SPAN_NAME: &str = "web.request";

/// Tag key carrying the action half of the routed endpoint.
pub const WEB_ROUTE_ACTION: &str = "web.route.action";

/// Tag key carrying the controller half of the routed endpoint.
pub const WEB_ROUTE_CONTROLLER: &str = "web.route.controller";

/// Bus channel announcing that a controller is about to process a request.
///
/// Adapters subscribe [`ControllerInstrumentation::on_request_start`] to this
/// channel.
pub const START_PROCESSING_EVENT: &str = "start_processing";

/// Bus channel announcing that a controller finished processing a request.
///
/// Adapters subscribe [`ControllerInstrumentation::on_request_complete`] to
/// this channel.
pub const PROCESS_ACTION_EVENT: &str = "process_action";

/// Controller-layer instrumentation for request-scoped traces.
///
/// Two decoupled framework events drive it: a start event when a request
/// reaches the controller layer, and a completion event once the controller
/// produced a response. The start handler opens the controller span; the
/// completion handler classifies the outcome onto it and closes it with the
/// timing the framework reported. A [`RequestContext`] correlates the two
/// handlers across one request.
///
/// Neither handler ever propagates a failure to its caller: instrumentation
/// problems are logged and discarded so the instrumented request proceeds
/// untouched.
///
/// # Examples
///
/// Wiring the handlers to a notification bus:
///
/// ```
/// use std::time::SystemTime;
/// use tracekit::trace::noop::NoopTracer;
/// use tracekit_web::{
///     CompletionPayload, Config, ControllerInstrumentation, RequestContext,
/// };
///
/// let instrumentation = ControllerInstrumentation::builder(NoopTracer::new())
///     .with_config(Config::default().with_service("billing"))
///     .build();
///
/// // A bus adapter calls the start handler for `START_PROCESSING_EVENT`
/// // and the completion handler for `PROCESS_ACTION_EVENT`.
/// let cx = RequestContext::new();
/// instrumentation.on_request_start(&cx);
///
/// let (start, finish) = (SystemTime::now(), SystemTime::now());
/// let payload = CompletionPayload::new()
///     .with_controller("InvoicesController")
///     .with_action("index")
///     .with_status(200);
/// instrumentation.on_request_complete(&cx, start, finish, &payload);
/// ```
#[derive(Debug)]
pub struct ControllerInstrumentation<T> {
    tracer: T,
    config: Config,
    status_resolver: Box<dyn ExceptionStatusResolver>,
}

impl<T> ControllerInstrumentation<T>
where
    T: Tracer,
{
    /// Create a builder for an instrumentation reporting through `tracer`.
    pub fn builder(tracer: T) -> ControllerInstrumentationBuilder<T> {
        ControllerInstrumentationBuilder {
            tracer,
            config: Config::default(),
            status_resolver: Box::new(FallbackStatusResolver::new()),
        }
    }

    /// Handle the event announcing that a controller is about to process a
    /// request.
    ///
    /// Opens the controller span and latches `cx` as pending. While the latch
    /// is set further start events for the request are ignored, so nested
    /// dispatches reuse the span opened for the outermost one. The latch is
    /// only set once the tracer has produced a span; failures are logged and
    /// discarded without disturbing the request.
    pub fn on_request_start(&self, cx: &RequestContext) {
        if let Err(err) = self.start_controller_span(cx) {
            tracekit_error!(
                name: "ControllerInstrumentation.OnRequestStart.Error",
                error = format!("{}", err)
            );
        }
    }

    /// Handle the event announcing that a controller finished processing a
    /// request.
    ///
    /// No-op unless `cx` was latched by a start event; the latch is cleared
    /// either way. Classifies the outcome carried in `payload` onto the
    /// active controller span: routed resource, routing tags, the parent
    /// resource rewrite, and the error state derived from the reported status
    /// or exception. The span is then closed over the `start..finish` window
    /// the framework reported rather than wall-clock time at call time, even
    /// when classification fails partway. Failures are logged and discarded
    /// without disturbing the request.
    pub fn on_request_complete(
        &self,
        cx: &RequestContext,
        start: SystemTime,
        finish: SystemTime,
        payload: &CompletionPayload,
    ) {
        if let Err(err) = self.finalize_controller_span(cx, start, finish, payload) {
            tracekit_error!(
                name: "ControllerInstrumentation.OnRequestComplete.Error",
                error = format!("{}", err)
            );
        }
    }

    fn start_controller_span(&self, cx: &RequestContext) -> Result<(), Error> {
        if cx.span_pending() {
            return Ok(());
        }

        let builder = SpanBuilder::from_name(CONTROLLER_SPAN_NAME)
            .with_service(self.config.service.clone())
            .with_span_type(conventions::SPAN_TYPE_HTTP);
        // The span stays with the tracer's active stack; the completion
        // handler picks it back up through active_span.
        self.tracer.trace(builder)?;

        cx.mark_pending();
        Ok(())
    }

    fn finalize_controller_span(
        &self,
        cx: &RequestContext,
        start: SystemTime,
        finish: SystemTime,
        payload: &CompletionPayload,
    ) -> Result<(), Error> {
        if !cx.take_pending() {
            return Ok(());
        }

        let Some(mut span) = self.tracer.active_span() else {
            tracekit_debug!(
                name: "ControllerInstrumentation.OnRequestComplete.NoActiveSpan",
                message = "pending request has no active span to finalize"
            );
            return Ok(());
        };

        let outcome = self.classify(&mut span, payload);

        // Close the span over the reported window even when classification
        // failed.
        span.set_start_time(start);
        span.finish_with_timestamp(finish);

        outcome
    }

    fn classify(&self, span: &mut T::Span, payload: &CompletionPayload) -> Result<(), Error> {
        let (controller, action) = payload.route()?;
        let resource = resource_identifier(controller, action);

        span.set_resource(resource.clone());

        // Set the parent resource if it is the transport-level request span
        if let Some(mut parent) = span.parent() {
            if parent.name() == REQUEST_SPAN_NAME {
                parent.set_resource(resource);
            }
        }

        span.set_tag(WEB_ROUTE_ACTION, action);
        span.set_tag(WEB_ROUTE_CONTROLLER, controller);

        match payload.exception() {
            None => {
                // In some cases the status is not reported; rather than
                // raising, acknowledge it is unknown.
                let status = payload.status().cloned().unwrap_or(HttpStatus::UNKNOWN);
                if status.is_server_error() {
                    span.set_status(SpanStatus::Error);
                }
            }
            Some(exception) => {
                let status = self
                    .status_resolver
                    .resolve(exception)
                    .unwrap_or(HttpStatus::UNKNOWN);
                span.record_exception(exception);
                if status.is_server_error() {
                    span.set_status(SpanStatus::Error);
                }
            }
        }

        Ok(())
    }
}

/// Builder for [`ControllerInstrumentation`].
#[derive(Debug)]
pub struct ControllerInstrumentationBuilder<T> {
    tracer: T,
    config: Config,
    status_resolver: Box<dyn ExceptionStatusResolver>,
}

impl<T> ControllerInstrumentationBuilder<T>
where
    T: Tracer,
{
    /// Assign the instrumentation configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Assign the resolver mapping exceptions to HTTP statuses
    pub fn with_status_resolver<R: ExceptionStatusResolver + 'static>(
        mut self,
        resolver: R,
    ) -> Self {
        self.status_resolver = Box::new(resolver);
        self
    }

    /// Build the instrumentation from the current configuration
    pub fn build(self) -> ControllerInstrumentation<T> {
        ControllerInstrumentation {
            tracer: self.tracer,
            config: self.config,
            status_resolver: self.status_resolver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracekit::testing::trace::TestTracer;
    use tracekit::trace::TraceError;

    fn instrumentation(tracer: &TestTracer) -> ControllerInstrumentation<TestTracer> {
        ControllerInstrumentation::builder(tracer.clone()).build()
    }

    #[test]
    fn start_opens_span_and_latches() {
        let tracer = TestTracer::new();
        let instr = instrumentation(&tracer);
        let cx = RequestContext::new();

        instr.on_request_start(&cx);

        assert!(cx.span_pending());
        let started = tracer.started_spans();
        assert_eq!(started.len(), 1);
        let data = started[0].data();
        assert_eq!(data.name, CONTROLLER_SPAN_NAME);
        assert_eq!(data.service.as_deref(), Some("web"));
        assert_eq!(data.span_type.as_deref(), Some("http"));
    }

    #[test]
    fn start_respects_configured_service() {
        let tracer = TestTracer::new();
        let instr = ControllerInstrumentation::builder(tracer.clone())
            .with_config(Config::default().with_service("billing"))
            .build();

        instr.on_request_start(&RequestContext::new());

        let data = tracer.started_spans()[0].data();
        assert_eq!(data.service.as_deref(), Some("billing"));
    }

    #[test]
    fn start_is_noop_while_pending() {
        let tracer = TestTracer::new();
        let instr = instrumentation(&tracer);
        let cx = RequestContext::new();

        instr.on_request_start(&cx);
        instr.on_request_start(&cx);

        assert_eq!(tracer.started_spans().len(), 1);
    }

    #[test]
    fn start_failure_leaves_context_idle() {
        let tracer = TestTracer::new();
        let instr = instrumentation(&tracer);
        let cx = RequestContext::new();

        tracer.fail_next_trace(TraceError::Unavailable("tracer offline".to_string()));
        instr.on_request_start(&cx);

        assert!(!cx.span_pending());
        assert!(tracer.started_spans().is_empty());

        // The next start event is free to try again.
        instr.on_request_start(&cx);
        assert!(cx.span_pending());
        assert_eq!(tracer.started_spans().len(), 1);
    }

    #[test]
    fn complete_is_noop_when_idle() {
        let tracer = TestTracer::new();
        let instr = instrumentation(&tracer);
        let cx = RequestContext::new();
        let now = SystemTime::now();

        instr.on_request_complete(&cx, now, now, &CompletionPayload::new());

        assert!(tracer.started_spans().is_empty());
        assert!(!cx.span_pending());
    }

    #[test]
    fn complete_clears_latch_without_active_span() {
        let tracer = TestTracer::new();
        let instr = instrumentation(&tracer);
        let cx = RequestContext::new();
        let now = SystemTime::now();

        instr.on_request_start(&cx);
        // The span finishes out from under the instrumentation.
        let mut span = tracer.started_spans().remove(0);
        span.finish();

        instr.on_request_complete(&cx, now, now, &CompletionPayload::new());
        assert!(!cx.span_pending());
        assert_eq!(span.data().finish_count, 1);
    }
}
