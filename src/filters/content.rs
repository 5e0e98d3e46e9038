use std::fmt;
use std::sync::Arc;

use crate::filter::Filter;
use crate::message::Message;
use crate::parser::{fail_with, parse, Parser};
use crate::status::HttpCode;

/// Handler receiving the request content type and parsed length.
pub type ContentHandler = Arc<dyn Fn(&Message, Option<&str>, Option<i64>) -> Parser + Send + Sync>;

/// Validates the request `Content-Type` and reads `Content-Length`.
#[derive(Clone, Default)]
pub struct Content {
    expected_type: Option<String>,
    handler: Option<ContentHandler>,
}

/// A content filter that accepts any type and has no handler.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{content, parse, Filter, Message};
///
/// let json = content()
///     .expect_type("application/json")
///     .handler(|msg, _ctype, length| {
///         assert_eq!(length, Some(2));
///         parse(msg.clone())
///     });
///
/// let req = RequestAdapter::new("POST", "/")
///     .with_header("Content-Type", "application/json")
///     .with_header("Content-Length", "2");
/// assert!(!json.apply(&Message::new(Arc::new(req))).failed());
/// ```
pub fn content() -> Content {
    Content::default()
}

impl Content {
    /// Requires an exact `Content-Type`; anything else, including a missing
    /// header, fails with `415 Unsupported Media Type`. An empty string
    /// disables the check.
    pub fn expect_type(mut self, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        self.expected_type = (!content_type.is_empty()).then_some(content_type);
        self
    }

    /// Passes the content type and length to `handler`. A length that is
    /// absent, padded with whitespace or not a 32-bit integer is `None`.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Message, Option<&str>, Option<i64>) -> Parser + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }
}

fn parse_length(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.parse::<i32>().ok()).map(i64::from)
}

impl Filter for Content {
    fn apply(&self, msg: &Message) -> Parser {
        let request = msg.request();
        let content_type = request.content_type();

        if let Some(expected) = &self.expected_type {
            if content_type.as_deref() != Some(expected.as_str()) {
                return fail_with(msg.clone(), HttpCode::UnsupportedMediaType);
            }
        }

        match &self.handler {
            Some(handler) => {
                let length = parse_length(request.content_length().as_deref());
                handler(msg, content_type.as_deref(), length)
            }
            None => parse(msg.clone()),
        }
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("expected_type", &self.expected_type)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}
