//! In-memory request and response for driving filters without a server.

use std::collections::{BTreeMap, HashMap};

use crate::status::Status;

use super::{Request, Response};

/// An owned, in-memory [`Request`].
///
/// `RequestAdapter` holds simple owned data so that it is not coupled to any
/// framework's request type. Framework integrations can either implement
/// [`Request`] directly or populate an adapter from their own types.
///
/// Header names are matched case-insensitively; parameter names are exact.
///
/// # Examples
///
/// ```
/// use request_gate::web::{Request, RequestAdapter};
///
/// let mut req = RequestAdapter::new("POST", "/a/b/c");
/// req.set_query_string("x=1");
/// req.set_host("example.com", 80);
/// req.add_header("Content-Type", "text/plain");
/// req.add_param("name", "value");
///
/// assert_eq!(req.uri(), "/a/b/c?x=1");
/// assert_eq!(req.header("content-type").as_deref(), Some("text/plain"));
/// assert_eq!(req.param("name").as_deref(), Some("value"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestAdapter {
    method: String,
    path: String,
    query_string: String,
    host_name: String,
    port: u16,
    /// Keyed by lowercased name
    headers: HashMap<String, String>,
    params: HashMap<String, String>,
}

impl RequestAdapter {
    /// Creates a request with the given method and path.
    ///
    /// All other fields start empty; the port starts at `0`.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Replaces the request method.
    pub fn set_method(&mut self, method: impl Into<String>) {
        self.method = method.into();
    }

    /// Replaces the request path.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Sets the raw query string, without the leading `?`.
    pub fn set_query_string(&mut self, qs: impl Into<String>) {
        self.query_string = qs.into();
    }

    /// Sets the host name and port the request was addressed to.
    pub fn set_host(&mut self, host_name: impl Into<String>, port: u16) {
        self.host_name = host_name.into();
        self.port = port;
    }

    /// Adds a header, replacing any previous value of the same name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Adds a request parameter, replacing any previous value.
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Builder form of [`add_header`](Self::add_header).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    /// Builder form of [`add_param`](Self::add_param).
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_param(name, value);
        self
    }
}

impl Request for RequestAdapter {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn query_string(&self) -> &str {
        &self.query_string
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers.get(&name.to_ascii_lowercase()).cloned()
    }

    fn param(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }

    fn host_name_and_port(&self) -> (String, u16) {
        (self.host_name.clone(), self.port)
    }
}

/// A [`Response`] that records everything written to it.
///
/// Used by tests to observe what the evaluator committed, including how many
/// times the status line was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedResponse {
    status: Status,
    headers: BTreeMap<String, String>,
    body: String,
    status_writes: usize,
}

impl RecordedResponse {
    /// Creates an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last status written.
    pub fn status_line(&self) -> &Status {
        &self.status
    }

    /// A header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// All headers written.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// The body written so far.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// How many times the status line was written.
    pub fn status_writes(&self) -> usize {
        self.status_writes
    }
}

impl Response for RecordedResponse {
    fn status(&mut self, code: u16, phrase: &str) {
        self.status = Status::new(code, phrase);
        self.status_writes += 1;
    }

    fn set_header(&mut self, name: &str, value: &str) {
        if !name.is_empty() {
            self.headers.insert(name.to_string(), value.to_string());
        }
    }

    fn write(&mut self, body: &str) {
        self.body.push_str(body);
    }
}
