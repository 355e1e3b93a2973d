use std::borrow::Cow;
use std::fmt;

use tracekit::trace::ExceptionInfo;

use crate::Error;

/// Data reported by the framework when a controller finishes processing a
/// request.
///
/// Every field is optional, and an empty payload is a valid one: frameworks
/// do not guarantee what a completion event carries. Missing routing fields
/// only become an error once the finalizer needs them to derive the resource,
/// via [`CompletionPayload::route`].
///
/// # Examples
///
/// ```
/// use tracekit_web::CompletionPayload;
///
/// let payload = CompletionPayload::new()
///     .with_controller("UsersController")
///     .with_action("show")
///     .with_status(200);
/// assert_eq!(payload.route().unwrap(), ("UsersController", "show"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CompletionPayload {
    controller: Option<String>,
    action: Option<String>,
    status: Option<HttpStatus>,
    exception: Option<ExceptionInfo>,
}

impl CompletionPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        CompletionPayload::default()
    }

    /// Specify the controller that handled the request.
    pub fn with_controller<T: Into<String>>(mut self, controller: T) -> Self {
        self.controller = Some(controller.into());
        self
    }

    /// Specify the action that handled the request.
    pub fn with_action<T: Into<String>>(mut self, action: T) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Specify the HTTP status the response completed with.
    pub fn with_status<T: Into<HttpStatus>>(mut self, status: T) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Specify the exception the controller raised.
    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    /// The reported HTTP status, if any.
    pub fn status(&self) -> Option<&HttpStatus> {
        self.status.as_ref()
    }

    /// The reported exception, if any.
    pub fn exception(&self) -> Option<&ExceptionInfo> {
        self.exception.as_ref()
    }

    /// The routed `(controller, action)` pair.
    ///
    /// Both halves are required once a request completes. The first missing
    /// one is reported as [`Error::MissingField`], controller before action.
    pub fn route(&self) -> Result<(&str, &str), Error> {
        let controller = self
            .controller
            .as_deref()
            .ok_or(Error::MissingField("controller"))?;
        let action = self
            .action
            .as_deref()
            .ok_or(Error::MissingField("action"))?;
        Ok((controller, action))
    }
}

/// Derive the resource identifier grouping requests by routed endpoint.
///
/// The identifier has the form `<controller>#<action>` and is computed fresh
/// from the payload of every completion event, never cached across requests.
pub fn resource_identifier(controller: &str, action: &str) -> String {
    format!("{}#{}", controller, action)
}

/// An HTTP status in its reported string form.
///
/// Statuses flow through as strings because payloads carry whatever the
/// framework reported, including the [`HttpStatus::UNKNOWN`] sentinel when
/// nothing was reported at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpStatus(Cow<'static, str>);

impl HttpStatus {
    /// Sentinel standing in for a status the framework never reported.
    ///
    /// Distinct from every real status code, and never classified as a
    /// server error.
    pub const UNKNOWN: HttpStatus = HttpStatus(Cow::Borrowed("?"));

    /// Whether this status reports a server-side failure.
    ///
    /// Classification looks at the literal leading character of the string
    /// form: a status is a server error exactly when it begins with `'5'`.
    /// No numeric parsing happens, so malformed values stay harmless.
    pub fn is_server_error(&self) -> bool {
        self.0.starts_with('5')
    }

    /// The status as reported.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for HttpStatus {
    fn from(status: &'static str) -> Self {
        HttpStatus(Cow::Borrowed(status))
    }
}

impl From<String> for HttpStatus {
    fn from(status: String) -> Self {
        HttpStatus(Cow::Owned(status))
    }
}

impl From<u16> for HttpStatus {
    fn from(status: u16) -> Self {
        HttpStatus(Cow::Owned(status.to_string()))
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_requires_both_fields() {
        let payload = CompletionPayload::new()
            .with_controller("UsersController")
            .with_action("show");
        assert_eq!(payload.route().unwrap(), ("UsersController", "show"));
    }

    #[test]
    fn route_reports_controller_before_action() {
        let empty = CompletionPayload::new();
        assert!(matches!(
            empty.route(),
            Err(Error::MissingField("controller"))
        ));

        let controller_only = CompletionPayload::new().with_controller("UsersController");
        assert!(matches!(
            controller_only.route(),
            Err(Error::MissingField("action"))
        ));

        let action_only = CompletionPayload::new().with_action("show");
        assert!(matches!(
            action_only.route(),
            Err(Error::MissingField("controller"))
        ));
    }

    #[test]
    fn resource_identifier_joins_route() {
        assert_eq!(
            resource_identifier("UsersController", "show"),
            "UsersController#show"
        );
    }

    #[rustfmt::skip]
    #[test]
    fn server_error_statuses() {
        let cases = vec![
            ("200", false),
            ("404", false),
            ("500", true),
            ("503", true),
            ("599", true),
            ("?", false),
            ("5xx", true),
            ("", false),
        ];

        for (status, server_error) in cases {
            assert_eq!(
                HttpStatus::from(status).is_server_error(),
                server_error,
                "status {:?}",
                status
            );
        }
    }

    #[test]
    fn numeric_statuses_match_string_form() {
        assert_eq!(HttpStatus::from(500), HttpStatus::from("500"));
        assert!(HttpStatus::from(502).is_server_error());
        assert!(!HttpStatus::from(204).is_server_error());
    }

    #[test]
    fn unknown_sentinel_is_not_an_error() {
        assert_eq!(HttpStatus::UNKNOWN.as_str(), "?");
        assert!(!HttpStatus::UNKNOWN.is_server_error());
    }
}
