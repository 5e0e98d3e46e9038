use std::fmt;

use regex::Regex;

use crate::error::Error;
use crate::filter::Filter;
use crate::message::Message;
use crate::parser::{fail_with, parse, Parser};
use crate::status::HttpCode;

use super::{fields_handler, FieldsHandler, MAX_PATH_PARTS};

/// Matches the whole request path against a regular expression.
///
/// Patterns are case-insensitive and anchored at both ends, whether or not
/// they carry their own `^` and `$`. The `regex` engine runs in linear time,
/// so a hostile path cannot stall evaluation.
#[derive(Clone)]
pub struct Path {
    pattern: String,
    regex: Regex,
    handler: Option<FieldsHandler>,
}

/// Compiles a path filter.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] if the pattern does not compile.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{parse, path, Filter, Message};
///
/// let items = path("/items/(\\d+)").unwrap().handler(|msg, parts| {
///     assert_eq!(parts[0].as_deref(), Some("/ITEMS/42"));
///     assert_eq!(parts[1].as_deref(), Some("42"));
///     assert_eq!(parts[2], None);
///     parse(msg.clone())
/// });
///
/// let msg = Message::new(Arc::new(RequestAdapter::new("GET", "/ITEMS/42")));
/// assert!(!items.apply(&msg).failed());
/// ```
pub fn path(pattern: &str) -> Result<Path, Error> {
    Path::new(pattern)
}

impl Path {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let regex = Regex::new(&format!("(?i)^(?:{pattern})$")).map_err(|e| {
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            handler: None,
        })
    }

    /// Concatenates pattern fragments, then compiles the result.
    ///
    /// ```
    /// use request_gate::Path;
    ///
    /// let p = Path::from_parts(["^/a", "/(\\w+)", "/(\\w+)$"]).unwrap();
    /// assert_eq!(p.as_str(), "^/a/(\\w+)/(\\w+)$");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the joined pattern does not
    /// compile.
    pub fn from_parts<I, S>(parts: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined: String = parts.into_iter().map(|p| p.as_ref().to_string()).collect();
        Self::new(&joined)
    }

    /// Passes the matched parts to `handler`.
    ///
    /// The handler receives [`MAX_PATH_PARTS`] values: the whole match, then
    /// the first three capture groups. Groups that did not participate, or do
    /// not exist, are `None`.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Message, &[Option<String>]) -> Parser + Send + Sync + 'static,
    {
        self.handler = Some(fields_handler(handler));
        self
    }

    /// The pattern as given.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl Filter for Path {
    fn apply(&self, msg: &Message) -> Parser {
        let Some(caps) = self.regex.captures(msg.request().path()) else {
            return fail_with(msg.clone(), HttpCode::NotFound);
        };

        match &self.handler {
            Some(handler) => {
                let parts: Vec<Option<String>> = (0..MAX_PATH_PARTS)
                    .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                    .collect();
                handler(msg, &parts)
            }
            None => parse(msg.clone()),
        }
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("pattern", &self.pattern)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}
