use crate::filter::{Expr, Filter};
use crate::message::Message;
use crate::parser::{parse, Parser};

/// Runs a filter for its effect only when it succeeds without completing.
#[derive(Debug, Clone)]
pub struct OptionFilter {
    inner: Expr,
}

/// Makes `filter` optional.
///
/// If `filter` fails or completes, its result is dropped and the chain
/// continues with the original message. Otherwise its result is returned.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{method, option, output, Expr, Filter, Message};
///
/// let greet = Expr::new(option(Expr::new(method(["POST"])) >> output("", "posted ")))
///     >> output("text/plain", "done");
///
/// let msg = Message::new(Arc::new(RequestAdapter::new("GET", "/")));
/// assert_eq!(greet.apply(&msg).message().response_body(), "done");
/// ```
pub fn option(filter: impl Filter + 'static) -> OptionFilter {
    OptionFilter {
        inner: Expr::new(filter),
    }
}

impl Filter for OptionFilter {
    fn apply(&self, msg: &Message) -> Parser {
        let result = self.inner.apply(msg);
        if result.failed_or_complete() {
            parse(msg.clone())
        } else {
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{complete, fail_with};
    use crate::status::HttpCode;
    use crate::web::RequestAdapter;
    use std::sync::Arc;

    fn message() -> Message {
        Message::new(Arc::new(RequestAdapter::new("GET", "/opt")))
    }

    #[test]
    fn success_is_kept() {
        let p = option(|msg: &Message| parse(msg.output("", "kept"))).apply(&message());
        assert!(!p.failed_or_complete());
        assert_eq!(p.message().response_body(), "kept");
    }

    #[test]
    fn failure_resumes_on_original() {
        let f = option(|msg: &Message| fail_with(msg.output("", "partial"), HttpCode::BadRequest));
        let p = f.apply(&message());
        assert!(!p.failed_or_complete());
        assert!(p.message().status().is_empty());
        assert_eq!(p.message().response_body(), "");
    }

    #[test]
    fn completion_is_swallowed_too() {
        let p = option(|msg: &Message| complete(msg.output("", "done"))).apply(&message());
        assert!(!p.complete());
        assert_eq!(p.message().response_body(), "");
    }
}
