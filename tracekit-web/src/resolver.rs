use std::fmt;

use tracekit::trace::ExceptionInfo;

use crate::payload::HttpStatus;

/// Status assumed for exceptions nothing else can classify.
pub const FALLBACK_ERROR_STATUS: &str = "500";

/// Strategy mapping a raised exception to the HTTP status the framework will
/// respond with.
///
/// Web frameworks usually know which exceptions translate to which responses,
/// a routing failure surfacing as a 404 for example. Implementations wrap
/// that knowledge. The instrumentation selects one resolver when it is built
/// instead of probing the environment on every request; environments without
/// such a mapping use [`FallbackStatusResolver`].
///
/// Returning `None` means the resolver has no mapping for this exception, and
/// the finalizer treats the status as [`HttpStatus::UNKNOWN`].
pub trait ExceptionStatusResolver: fmt::Debug + Send + Sync {
    /// The status responses to `exception` complete with, if known.
    fn resolve(&self, exception: &ExceptionInfo) -> Option<HttpStatus>;
}

/// Resolver used when the environment offers no exception-to-status mapping.
///
/// Every exception resolves to [`FALLBACK_ERROR_STATUS`], the conventional
/// status for an unhandled server-side failure.
#[derive(Clone, Debug, Default)]
pub struct FallbackStatusResolver {
    _private: (),
}

impl FallbackStatusResolver {
    /// Create a new fallback resolver
    pub fn new() -> Self {
        FallbackStatusResolver { _private: () }
    }
}

impl ExceptionStatusResolver for FallbackStatusResolver {
    fn resolve(&self, _exception: &ExceptionInfo) -> Option<HttpStatus> {
        Some(HttpStatus::from(FALLBACK_ERROR_STATUS))
    }
}
