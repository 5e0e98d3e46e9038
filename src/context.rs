use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::message::Message;
use crate::web::{Request, Response};

/// Per-request evaluation context.
///
/// `Context<R>` pairs the shared, read-only request with the response sink it
/// will eventually be committed to. Messages derived during evaluation hold
/// only the request; the response is reachable solely through the context,
/// so only the [`Evaluator`](crate::Evaluator) can write to it.
///
/// A context is committed at most once.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::{RecordedResponse, RequestAdapter};
/// use request_gate::Context;
///
/// let ctx = Context::new(Arc::new(RequestAdapter::new("GET", "/")), RecordedResponse::new());
/// assert!(!ctx.is_committed());
/// assert_eq!(ctx.request().method(), "GET");
/// ```
pub struct Context<R: Response> {
    request: Arc<dyn Request>,
    response: R,
    committed: bool,
}

impl<R: Response> Context<R> {
    /// Creates a context for a request and its response sink.
    pub fn new(request: Arc<dyn Request>, response: R) -> Self {
        Self {
            request,
            response,
            committed: false,
        }
    }

    /// The request being evaluated.
    pub fn request(&self) -> &dyn Request {
        self.request.as_ref()
    }

    /// The response sink.
    pub fn response(&self) -> &R {
        &self.response
    }

    /// Whether a response has already been committed.
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Consumes the context, returning the response sink.
    pub fn into_response(self) -> R {
        self.response
    }

    /// Creates the first message of an evaluation.
    pub(crate) fn message(&self) -> Message {
        Message::new(Arc::clone(&self.request))
    }

    /// Writes status, headers and body to the response, once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyCommitted`] on every call after the first.
    pub(crate) fn commit(&mut self, msg: &Message) -> Result<(), Error> {
        if self.committed {
            return Err(Error::AlreadyCommitted);
        }
        self.committed = true;

        let status = msg.status();
        self.response.status(status.code(), status.phrase());
        for (name, value) in msg.response_headers() {
            self.response.set_header(name, value);
        }
        if !msg.response_body().is_empty() {
            self.response.write(msg.response_body());
        }
        Ok(())
    }
}

impl<R: Response + fmt::Debug> fmt::Debug for Context<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("method", &self.request.method())
            .field("path", &self.request.path())
            .field("response", &self.response)
            .field("committed", &self.committed)
            .finish()
    }
}
