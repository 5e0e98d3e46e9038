use crate::filter::Filter;
use crate::message::Message;
use crate::parser::{fail_with, parse, Parser};
use crate::status::HttpCode;

/// Passes when the request method is one of a list.
///
/// Matching is exact: `get` does not match `GET`.
#[derive(Debug, Clone)]
pub struct Method {
    methods: Vec<String>,
}

/// Accepts any of `methods`; otherwise fails with `405 Method Not Allowed`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{method, Filter, Message};
///
/// let msg = Message::new(Arc::new(RequestAdapter::new("PUT", "/")));
/// let result = method(["GET", "HEAD"]).apply(&msg);
/// assert!(result.failed());
/// assert_eq!(result.message().status().code(), 405);
/// ```
pub fn method<I, S>(methods: I) -> Method
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Method {
        methods: methods.into_iter().map(Into::into).collect(),
    }
}

impl Method {
    /// The accepted methods.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }
}

impl Filter for Method {
    fn apply(&self, msg: &Message) -> Parser {
        let actual = msg.request().method();
        if self.methods.iter().any(|m| m == actual) {
            parse(msg.clone())
        } else {
            fail_with(msg.clone(), HttpCode::MethodNotAllowed)
        }
    }
}
