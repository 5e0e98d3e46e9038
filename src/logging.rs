use std::fmt;

/// Request-scoped logging for filters and the evaluator.
///
/// `EvalLog` is obtained from [`Message::log`](crate::Message::log) and is
/// lifetime-bound to that message. Every event it emits carries the request
/// method and path as structured fields.
///
/// Credentials must never be passed to it. [`BearerToken`](crate::BearerToken)
/// and [`MacHeader`](crate::MacHeader) redact themselves when formatted, so
/// logging them by `Debug` or `Display` is safe.
#[derive(Debug, Clone, Copy)]
pub struct EvalLog<'a> {
    method: &'a str,
    path: &'a str,
}

impl<'a> EvalLog<'a> {
    /// Only `Message` creates loggers.
    pub(crate) fn new(method: &'a str, path: &'a str) -> Self {
        Self { method, path }
    }

    /// The request method attached to every event.
    pub fn method(&self) -> &str {
        self.method
    }

    /// The request path attached to every event.
    pub fn path(&self) -> &str {
        self.path
    }

    /// Logs a trace-level message.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use request_gate::Message;
    /// # use request_gate::web::RequestAdapter;
    /// let msg = Message::new(Arc::new(RequestAdapter::new("GET", "/items")));
    /// msg.log().trace(format_args!("alternative {} rejected", 2));
    /// ```
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        tracing::trace!(method = %self.method, path = %self.path, "{}", args);
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(method = %self.method, path = %self.path, "{}", args);
    }

    /// Logs an info-level message.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(method = %self.method, path = %self.path, "{}", args);
    }

    /// Logs a warning-level message.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(method = %self.method, path = %self.path, "{}", args);
    }
}
