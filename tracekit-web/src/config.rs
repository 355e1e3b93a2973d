/// Default service name if no service is configured.
pub const DEFAULT_SERVICE_NAME: &str = "web";

/// Static configuration for the controller instrumentation.
///
/// Built once at startup and moved into the instrumentation, which reads it
/// for the rest of its lifetime. There is no reloading: changing
/// configuration means building a new instrumentation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Service name controller spans are reported under.
    pub service: String,
}

impl Config {
    /// Assign the service name under which to report controller spans
    pub fn with_service<T: Into<String>>(mut self, service: T) -> Self {
        self.service = service.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}
