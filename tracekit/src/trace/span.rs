use std::borrow::Cow;
use std::error::Error;
use std::time::SystemTime;

use crate::conventions;

/// The interface for a single operation within a trace.
///
/// Spans can be nested to form a trace tree. Each trace contains a root span,
/// which typically describes the entire operation and, optionally, one or more
/// sub-spans for its sub-operations.
///
/// The span name concisely identifies the class of work represented by the
/// span, for example an RPC method name or a request-handling stage.
/// _Generality_ should be prioritized over _human-readability_: the name
/// should identify a (statistically) interesting class of spans rather than
/// individual span instances, so `"web.controller"` is a reasonable name while
/// `"web.controller/314159"` is not. The concrete endpoint within that class
/// is carried by the span's *resource* instead, for example
/// `"UsersController#show"`, which groups requests hitting the same handler
/// without the cardinality problems of encoding it in the name.
///
/// The span's start and end timestamps reflect the elapsed real time of the
/// operation. Instrumentations that learn the real timing only after the fact,
/// such as ones fed from a notification bus, may overwrite the start time
/// before finishing the span.
///
/// A span ends only through [`Span::finish`] or
/// [`Span::finish_with_timestamp`]. Dropping a span handle does not finish the
/// span: the code that opens a span and the code that finishes it may hold
/// different handles, with the tracer's active stack bridging the two.
pub trait Span {
    /// The name this span was started with.
    fn name(&self) -> Cow<'static, str>;

    /// The span this span was started under, if any.
    ///
    /// Implementations return a handle to the same underlying span state, so
    /// mutations through the returned value are visible to other holders.
    fn parent(&self) -> Option<Self>
    where
        Self: Sized;

    /// Set the resource this span is grouped under.
    ///
    /// Setting a resource overwrites any previously set value.
    fn set_resource<T>(&mut self, resource: T)
    where
        T: Into<Cow<'static, str>>;

    /// Set a tag on this span.
    ///
    /// Setting a tag with the same key as an existing tag overwrites the
    /// existing tag's value. Fixed keys with prescribed meanings are available
    /// via the [`conventions`] module.
    fn set_tag<T>(&mut self, key: &'static str, value: T)
    where
        T: Into<String>;

    /// Set the status of this span.
    ///
    /// If used, this will override the default span status, which is
    /// [`SpanStatus::Unset`].
    fn set_status(&mut self, status: SpanStatus);

    /// Overwrite the span's start time.
    fn set_start_time(&mut self, timestamp: SystemTime);

    /// Record details of an exception on this span.
    ///
    /// The exception kind, message and backtrace are written under the fixed
    /// [`conventions`] tag keys. An additional call to [`Span::set_status`] is
    /// required if the status of the span should be set to error, as this
    /// method does not change the span status.
    fn record_exception(&mut self, exception: &ExceptionInfo) {
        self.set_tag(conventions::ERROR_TYPE, exception.kind.clone());
        self.set_tag(conventions::ERROR_MSG, exception.message.clone());
        if let Some(backtrace) = &exception.backtrace {
            self.set_tag(conventions::ERROR_STACK, backtrace.clone());
        }
    }

    /// Record an error value as an exception on this span.
    ///
    /// Shorthand for [`Span::record_exception`] with
    /// [`ExceptionInfo::from_error`].
    fn record_error<E>(&mut self, err: &E)
    where
        E: Error,
    {
        self.record_exception(&ExceptionInfo::from_error(err));
    }

    /// Signals that the operation described by this span has now ended.
    fn finish(&mut self) {
        self.finish_with_timestamp(crate::time::now());
    }

    /// Signals that the operation described by this span ended at the given
    /// time.
    ///
    /// Implementations must treat the first call as final: later calls do not
    /// move the end time.
    fn finish_with_timestamp(&mut self, timestamp: SystemTime);
}

/// The classified outcome of a [`Span`].
///
/// A span starts out as [`SpanStatus::Unset`]. Instrumentations should leave
/// the status unset unless the operation is known to have failed on the
/// serving side; analysis tools treat unset spans as successful. Client-side
/// failures such as a 404 are deliberately not errors of the server span.
///
/// Only the value of the last call to [`Span::set_status`] is recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SpanStatus {
    /// The default status.
    #[default]
    Unset,

    /// The operation has been validated to have completed successfully.
    Ok,

    /// The operation contains an error.
    Error,
}

/// Details of an exception captured for error reporting on a span.
///
/// Reifies the (exception class, exception instance) pair handed around by
/// notification payloads: the class or kind, the message, and optionally a
/// rendered backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExceptionInfo {
    /// The class or kind of the exception, e.g. a type name.
    pub kind: Cow<'static, str>,

    /// The message carried by the exception.
    pub message: String,

    /// A rendered backtrace, if one was captured.
    pub backtrace: Option<String>,
}

impl ExceptionInfo {
    /// Create exception details from a kind and a message.
    pub fn new(kind: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        ExceptionInfo {
            kind: kind.into(),
            message: message.into(),
            backtrace: None,
        }
    }

    /// Attach a rendered backtrace.
    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }

    /// Create exception details from an error value.
    ///
    /// The error's type name is used as the kind and its `Display` output as
    /// the message. No backtrace is captured.
    ///
    /// # Examples
    ///
    /// ```
    /// use tracekit::trace::ExceptionInfo;
    ///
    /// let err = "not a number".parse::<u32>().unwrap_err();
    /// let exception = ExceptionInfo::from_error(&err);
    /// assert_eq!(exception.kind, "core::num::error::ParseIntError");
    /// ```
    pub fn from_error<E>(err: &E) -> Self
    where
        E: Error,
    {
        ExceptionInfo::new(std::any::type_name::<E>(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_unset() {
        assert_eq!(SpanStatus::default(), SpanStatus::Unset);
    }

    #[test]
    fn exception_info_from_error() {
        let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
        let exception = ExceptionInfo::from_error(&err);
        assert_eq!(exception.kind, "std::io::error::Error");
        assert_eq!(exception.message, "upstream timed out");
        assert_eq!(exception.backtrace, None);
    }

    #[test]
    fn exception_info_backtrace() {
        let exception = ExceptionInfo::new("RoutingError", "no route matches")
            .with_backtrace("app/controllers/users_controller.rb:5");
        assert_eq!(
            exception.backtrace.as_deref(),
            Some("app/controllers/users_controller.rb:5")
        );
    }
}
