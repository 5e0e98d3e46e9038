use std::fmt;

use crate::error::Error;
use crate::filter::Filter;
use crate::message::Message;
use crate::parser::{fail_with, parse, Parser};
use crate::status::HttpCode;

use super::{fields_handler, FieldsHandler, MAX_FIELDS};

/// Which declared headers must be present when no handler is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Required {
    /// Only the last declared header.
    #[default]
    Last,
    /// Every declared header.
    All,
    /// None; the filter always passes.
    Nothing,
}

/// Extracts up to [`MAX_FIELDS`] request headers.
///
/// With a handler, the values are passed to it positionally and the handler
/// decides the outcome. Without one, missing headers are checked against
/// [`Required`] and fail with `400 Bad Request`.
#[derive(Clone)]
pub struct Header {
    names: Vec<String>,
    handler: Option<FieldsHandler>,
    required: Required,
}

/// Builds a header filter over `names`.
///
/// # Errors
///
/// Returns [`Error::TooManyFields`] if more than [`MAX_FIELDS`] names are
/// given.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{header, parse, Filter, Message};
///
/// let accept = header(["Accept"]).unwrap().handler(|msg, values| {
///     let body = values[0].clone().unwrap_or_default();
///     parse(msg.output("text/plain", &body))
/// });
///
/// let req = RequestAdapter::new("GET", "/").with_header("Accept", "text/html");
/// let msg = Message::new(Arc::new(req));
/// assert_eq!(accept.apply(&msg).message().response_body(), "text/html");
/// ```
pub fn header<I, S>(names: I) -> Result<Header, Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    if names.len() > MAX_FIELDS {
        return Err(Error::TooManyFields {
            filter: "header",
            max: MAX_FIELDS,
            given: names.len(),
        });
    }
    Ok(Header {
        names,
        handler: None,
        required: Required::default(),
    })
}

impl Header {
    /// Passes the header values to `handler`, one per declared name.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Message, &[Option<String>]) -> Parser + Send + Sync + 'static,
    {
        self.handler = Some(fields_handler(handler));
        self
    }

    /// Sets which headers must be present when there is no handler.
    pub fn required(mut self, required: Required) -> Self {
        self.required = required;
        self
    }

    /// The declared header names.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Filter for Header {
    fn apply(&self, msg: &Message) -> Parser {
        if self.names.is_empty() {
            return parse(msg.clone());
        }

        let values: Vec<Option<String>> = self
            .names
            .iter()
            .map(|name| msg.request().header(name))
            .collect();

        if let Some(handler) = &self.handler {
            return handler(msg, &values);
        }

        let missing = match self.required {
            Required::Last => values.last().is_some_and(Option::is_none),
            Required::All => values.iter().any(Option::is_none),
            Required::Nothing => false,
        };
        if missing {
            fail_with(msg.clone(), HttpCode::BadRequest)
        } else {
            parse(msg.clone())
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("names", &self.names)
            .field("required", &self.required)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fail;
    use crate::web::RequestAdapter;
    use std::sync::Arc;

    fn message(headers: &[(&str, &str)]) -> Message {
        let mut req = RequestAdapter::new("GET", "/");
        for (k, v) in headers {
            req.add_header(*k, *v);
        }
        Message::new(Arc::new(req))
    }

    #[test]
    fn handler_receives_values_in_order() {
        let f = header(["A", "B", "C"]).unwrap().handler(|msg, values| {
            assert_eq!(values.len(), 3);
            assert_eq!(values[0].as_deref(), Some("1"));
            assert_eq!(values[1], None);
            assert_eq!(values[2].as_deref(), Some("3"));
            parse(msg.clone())
        });
        assert!(!f.apply(&message(&[("A", "1"), ("C", "3")])).failed());
    }

    #[test]
    fn handler_decides_outcome() {
        let f = header(["A"]).unwrap().handler(|msg, _| fail(msg.clone()));
        assert!(f.apply(&message(&[("A", "1")])).failed());
    }

    #[test]
    fn missing_last_header_is_400_by_default() {
        let f = header(["A", "B"]).unwrap();
        let p = f.apply(&message(&[("A", "1")]));
        assert!(p.failed_not_complete());
        assert_eq!(p.message().status().code(), 400);
    }

    #[test]
    fn missing_earlier_header_passes_by_default() {
        let f = header(["A", "B"]).unwrap();
        assert!(!f.apply(&message(&[("B", "2")])).failed());
    }

    #[test]
    fn required_all_checks_every_header() {
        let f = header(["A", "B"]).unwrap().required(Required::All);
        assert!(f.apply(&message(&[("B", "2")])).failed());
        assert!(!f.apply(&message(&[("A", "1"), ("B", "2")])).failed());
    }

    #[test]
    fn required_nothing_always_passes() {
        let f = header(["A"]).unwrap().required(Required::Nothing);
        assert!(!f.apply(&message(&[])).failed());
    }

    #[test]
    fn no_names_passes_through() {
        let f = header(Vec::<String>::new()).unwrap().handler(|_, _| panic!("not called"));
        assert!(!f.apply(&message(&[])).failed());
    }

    #[test]
    fn more_than_three_names_is_an_error() {
        let err = header(["A", "B", "C", "D"]).unwrap_err();
        assert_eq!(
            err,
            Error::TooManyFields {
                filter: "header",
                max: 3,
                given: 4
            }
        );
    }
}
