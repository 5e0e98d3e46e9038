use crate::filter::{Expr, Filter};
use crate::message::Message;
use crate::parser::{fail_with, Parser};
use crate::status::HttpCode;

/// Tries alternatives in order and keeps the first that does not fail.
#[derive(Debug, Clone, Default)]
pub struct Choice {
    alternatives: Vec<Expr>,
}

/// Builds a choice over `alternatives`.
///
/// Every alternative sees the same input message. The first result that
/// did not fail, or that completed, is returned as is. When all fail, or
/// there are none, the result is a failed `404 Not Found`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{choice, method, output, Expr, Filter, Message};
///
/// let routes = choice([
///     Expr::new(method(["POST"])) >> output("text/plain", "created"),
///     Expr::new(method(["GET"])) >> output("text/plain", "listed"),
/// ]);
///
/// let msg = Message::new(Arc::new(RequestAdapter::new("GET", "/")));
/// assert_eq!(routes.apply(&msg).message().response_body(), "listed");
///
/// let msg = Message::new(Arc::new(RequestAdapter::new("PUT", "/")));
/// assert_eq!(routes.apply(&msg).message().status().code(), 404);
/// ```
pub fn choice<I>(alternatives: I) -> Choice
where
    I: IntoIterator<Item = Expr>,
{
    Choice {
        alternatives: alternatives.into_iter().collect(),
    }
}

impl Choice {
    /// Appends an alternative, tried after the existing ones.
    pub fn or(mut self, alternative: impl Filter + 'static) -> Self {
        self.alternatives.push(Expr::new(alternative));
        self
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Whether there are no alternatives.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl Filter for Choice {
    fn apply(&self, msg: &Message) -> Parser {
        for (i, alternative) in self.alternatives.iter().enumerate() {
            let result = alternative.apply(msg);
            if result.not_failed_or_complete() {
                return result;
            }
            msg.log().trace(format_args!(
                "alternative {} rejected with {}",
                i,
                result.message().status()
            ));
        }
        fail_with(msg.clone(), HttpCode::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{complete_with_error, fail, parse, Complete, Failed};
    use crate::web::RequestAdapter;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn message() -> Message {
        Message::new(Arc::new(RequestAdapter::new("GET", "/choice")))
    }

    fn tagged(tag: &'static str) -> Expr {
        Expr::new(move |msg: &Message| parse(msg.output("", tag)))
    }

    fn failing() -> Expr {
        Expr::new(|msg: &Message| fail_with(msg.output("", "partial"), HttpCode::BadRequest))
    }

    #[test]
    fn empty_choice_is_404_failure() {
        let c = choice(Vec::new());
        assert!(c.is_empty());
        let p = c.apply(&message());
        assert!(p.failed_not_complete());
        assert_eq!(p.message().status().code(), 404);
        assert_eq!(p.message().status().phrase(), "Not Found");
    }

    #[test]
    fn first_success_wins() {
        let p = choice([tagged("a"), tagged("b")]).apply(&message());
        assert_eq!(p.message().response_body(), "a");
    }

    #[test]
    fn failures_are_skipped_without_leaking() {
        let p = choice([failing(), tagged("b")]).apply(&message());
        assert_eq!(p.message().response_body(), "b");
        assert!(p.message().status().is_empty());
    }

    #[test]
    fn all_failing_discards_partial_output() {
        let p = choice([failing(), failing()]).apply(&message());
        assert_eq!(p.message().status().code(), 404);
        assert_eq!(p.message().response_body(), "");
    }

    #[test]
    fn complete_result_is_kept_even_if_failed() {
        let terminal = Expr::new(|msg: &Message| {
            let p = complete_with_error(msg.clone(), HttpCode::Forbidden);
            Parser::new(p.into_message(), Failed::Failed, Complete::Complete)
        });
        let p = choice([terminal, tagged("never")]).apply(&message());
        assert!(p.complete());
        assert_eq!(p.message().status().code(), 403);
    }

    #[test]
    fn later_alternatives_are_not_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = Expr::new(move |msg: &Message| {
            counter.fetch_add(1, Ordering::SeqCst);
            fail(msg.clone())
        });
        let _ = choice([tagged("a"), counted]).apply(&message());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn or_appends() {
        let c = choice([failing()]).or(|msg: &Message| parse(msg.output("", "z")));
        assert_eq!(c.len(), 2);
        assert_eq!(c.apply(&message()).message().response_body(), "z");
    }
}
