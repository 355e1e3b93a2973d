use std::cell::Cell;

/// Per-request bookkeeping shared by the two controller event handlers.
///
/// A context belongs to the single thread of execution handling one request,
/// and both handlers receive a reference to the same context. The pending
/// latch it carries is what correlates the two decoupled events: the start
/// handler sets it when it opens the controller span, and the completion
/// handler clears it before finalizing.
///
/// The type is deliberately not `Sync`. Concurrent requests each get their
/// own context, so no handler ever observes another request's pending state.
#[derive(Debug, Default)]
pub struct RequestContext {
    span_pending: Cell<bool>,
}

impl RequestContext {
    /// Create a context with no span pending.
    pub fn new() -> Self {
        RequestContext::default()
    }

    /// Whether a controller span has been opened for this request and not yet
    /// finalized.
    pub fn span_pending(&self) -> bool {
        self.span_pending.get()
    }

    pub(crate) fn mark_pending(&self) {
        self.span_pending.set(true);
    }

    /// Clears the latch, returning whether it was set.
    pub(crate) fn take_pending(&self) -> bool {
        self.span_pending.replace(false)
    }
}
