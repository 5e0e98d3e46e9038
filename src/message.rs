use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::logging::EvalLog;
use crate::status::{HttpCode, Status};
use crate::web::{Request, CONTENT_TYPE, WWW_AUTHENTICATE};

/// Response headers accumulated by a message, keyed by exact name.
pub type ResponseHeaders = BTreeMap<String, String>;

/// Immutable per-request evaluation state.
///
/// A `Message` layers the response being built (status, headers, body) over
/// a shared, read-only [`Request`]. Every update returns a new message and
/// leaves the receiver untouched, so a filter that fails can never leak a
/// partial change into the message an alternative sees.
///
/// Header names are case-sensitive; the last write wins. Empty names are
/// ignored. The body only grows.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::Message;
///
/// let original = Message::new(Arc::new(RequestAdapter::new("GET", "/")));
/// let updated = original.output("text/plain", "abc").output("", "def");
///
/// assert_eq!(updated.response_body(), "abcdef");
/// assert_eq!(updated.response_content_type(), Some("text/plain"));
/// assert_eq!(original.response_body(), "");
/// ```
#[derive(Clone)]
pub struct Message {
    request: Arc<dyn Request>,
    status: Status,
    headers: ResponseHeaders,
    body: String,
}

impl Message {
    /// Creates an empty message over a request.
    pub fn new(request: Arc<dyn Request>) -> Self {
        Self {
            request,
            status: Status::default(),
            headers: ResponseHeaders::new(),
            body: String::new(),
        }
    }

    /// The request under evaluation.
    pub fn request(&self) -> &dyn Request {
        self.request.as_ref()
    }

    /// The current status; unset until a filter sets one.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// All response headers set so far.
    pub fn response_headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    /// A response header value.
    pub fn response_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Whether a response header is set.
    pub fn has_response_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// The response `Content-Type`.
    pub fn response_content_type(&self) -> Option<&str> {
        self.response_header(CONTENT_TYPE)
    }

    /// With `Some(ctype)`, whether the response content type equals it.
    /// With `None`, whether a non-empty content type is set at all.
    pub fn has_response_content_type(&self, ctype: Option<&str>) -> bool {
        match (self.response_content_type(), ctype) {
            (Some(current), Some(expected)) => current == expected,
            (Some(current), None) => !current.is_empty(),
            (None, _) => false,
        }
    }

    /// The response body accumulated so far.
    pub fn response_body(&self) -> &str {
        &self.body
    }

    /// A logger tagged with this request's method and path.
    pub fn log(&self) -> EvalLog<'_> {
        EvalLog::new(self.request.method(), self.request.path())
    }

    /// Returns a copy with the status replaced.
    pub fn set_status(&self, status: impl Into<Status>) -> Message {
        let mut other = self.clone();
        other.status = status.into();
        other
    }

    /// Returns a copy with one response header set.
    pub fn set_response_header(&self, name: &str, value: &str) -> Message {
        let mut other = self.clone();
        other.put_header(name, value);
        other
    }

    /// Returns a copy with every pair merged into the response headers.
    pub fn set_response_headers<I, K, V>(&self, headers: I) -> Message
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut other = self.clone();
        for (name, value) in headers {
            other.put_header(name.as_ref(), value.as_ref());
        }
        other
    }

    /// Returns a copy with `content` appended to the body. A non-empty
    /// `content_type` replaces the response content type.
    pub fn output(&self, content_type: &str, content: &str) -> Message {
        let mut other = self.clone();
        other.append_content(content_type, content);
        other
    }

    /// [`output`](Self::output) followed by [`set_status`](Self::set_status).
    pub fn output_status(
        &self,
        status: impl Into<Status>,
        content_type: &str,
        content: &str,
    ) -> Message {
        let mut other = self.output(content_type, content);
        other.status = status.into();
        other
    }

    /// Returns a copy carrying a `401 Unauthorized` status and a
    /// `WWW-Authenticate` challenge.
    pub fn set_authentication_challenge(&self, challenge: &str) -> Message {
        let mut other = self.set_response_header(WWW_AUTHENTICATE, challenge);
        other.status = HttpCode::Unauthorized.into();
        other
    }

    /// [`set_authentication_challenge`](Self::set_authentication_challenge)
    /// with a response body.
    pub fn set_authentication_challenge_with_content(
        &self,
        challenge: &str,
        content_type: &str,
        content: &str,
    ) -> Message {
        let mut other = self.set_authentication_challenge(challenge);
        other.append_content(content_type, content);
        other
    }

    fn put_header(&mut self, name: &str, value: &str) {
        if !name.is_empty() {
            self.headers.insert(name.to_string(), value.to_string());
        }
    }

    fn append_content(&mut self, content_type: &str, content: &str) {
        if !content_type.is_empty() {
            self.put_header(CONTENT_TYPE, content_type);
        }
        self.body.push_str(content);
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("method", &self.request.method())
            .field("path", &self.request.path())
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}
