use crate::filter::Filter;
use crate::message::Message;
use crate::parser::{parse, Parser};

/// Appends a fixed body to the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    content_type: String,
    body: String,
}

impl Output {
    /// Appends `body`, replacing the content type unless `content_type` is
    /// empty.
    pub fn new(content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }
}

/// Shorthand for [`Output::new`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{output, Expr, Filter, Message};
///
/// let chain = Expr::new(output("text/plain", "abc")) >> output("", "def");
/// let msg = Message::new(Arc::new(RequestAdapter::new("GET", "/")));
/// let result = chain.apply(&msg);
///
/// assert_eq!(result.message().response_body(), "abcdef");
/// assert_eq!(result.message().response_content_type(), Some("text/plain"));
/// ```
pub fn output(content_type: impl Into<String>, body: impl Into<String>) -> Output {
    Output::new(content_type, body)
}

impl Filter for Output {
    fn apply(&self, msg: &Message) -> Parser {
        parse(msg.output(&self.content_type, &self.body))
    }
}

/// Merges fixed headers into the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RHeader {
    headers: Vec<(String, String)>,
}

/// Sets every `(name, value)` pair as a response header, later pairs
/// winning. Pairs with an empty name are skipped.
pub fn rheader<I, K, V>(headers: I) -> RHeader
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    RHeader {
        headers: headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
    }
}

impl Filter for RHeader {
    fn apply(&self, msg: &Message) -> Parser {
        parse(msg.set_response_headers(self.headers.iter().map(|(k, v)| (k, v))))
    }
}

/// Forbids caching of the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoCache;

/// Sets `Cache-Control: no-store` and `Pragma: no-cache`.
pub fn no_cache() -> NoCache {
    NoCache
}

impl Filter for NoCache {
    fn apply(&self, msg: &Message) -> Parser {
        parse(msg.set_response_headers([("Cache-Control", "no-store"), ("Pragma", "no-cache")]))
    }
}

/// The identity filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pass;

/// Always continues with the message unchanged.
pub fn pass() -> Pass {
    Pass
}

impl Filter for Pass {
    fn apply(&self, msg: &Message) -> Parser {
        parse(msg.clone())
    }
}
