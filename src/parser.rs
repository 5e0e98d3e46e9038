//! Evaluation outcomes and the constructors filters build them with.
//!
//! A [`Parser`] wraps the [`Message`] a filter produced together with two
//! flags. `failed` marks a filter whose expectations were not met: the chain
//! stops, but an enclosing [`choice`](crate::choice) may still try another
//! alternative. `complete` marks a final answer: nothing downstream may
//! alter the response.

use crate::message::Message;
use crate::status::{HttpCode, Status};

/// Whether a filter failed to meet its expectations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Failed {
    /// Not run, or succeeded.
    #[default]
    Unknown,
    /// Expectations were not met.
    Failed,
}

/// Whether evaluation must stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Complete {
    /// Not run, or may continue.
    #[default]
    Unknown,
    /// No further filter may run.
    Complete,
}

/// The outcome of applying a filter to a message.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{fail_with, parse, HttpCode, Message};
///
/// let msg = Message::new(Arc::new(RequestAdapter::new("GET", "/")));
///
/// let live = parse(msg.clone());
/// assert!(!live.failed_or_complete());
///
/// let failed = fail_with(msg, HttpCode::NotFound);
/// assert!(failed.failed_not_complete());
/// assert_eq!(failed.message().status().code(), 404);
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    message: Message,
    failed: Failed,
    complete: Complete,
}

impl Parser {
    /// Creates a parser with explicit flags.
    pub fn new(message: Message, failed: Failed, complete: Complete) -> Self {
        Self {
            message,
            failed,
            complete,
        }
    }

    /// The message produced so far.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Consumes the parser, returning its message.
    pub fn into_message(self) -> Message {
        self.message
    }

    /// The failure flag.
    pub fn failed_flag(&self) -> Failed {
        self.failed
    }

    /// The completion flag.
    pub fn complete_flag(&self) -> Complete {
        self.complete
    }

    /// Whether the filter failed.
    pub fn failed(&self) -> bool {
        self.failed == Failed::Failed
    }

    /// Whether evaluation must stop.
    pub fn complete(&self) -> bool {
        self.complete == Complete::Complete
    }

    /// Whether the chain stops here.
    pub fn failed_or_complete(&self) -> bool {
        self.failed() || self.complete()
    }

    /// Whether this is a bare failure that another alternative may replace.
    pub fn failed_not_complete(&self) -> bool {
        self.failed() && !self.complete()
    }

    /// Whether this outcome should be kept rather than retried: it did not
    /// fail, or it is final.
    pub fn not_failed_or_complete(&self) -> bool {
        !self.failed() || self.complete()
    }
}

/// A live parser: not failed, not complete.
pub fn parse(msg: Message) -> Parser {
    Parser::new(msg, Failed::Unknown, Complete::Unknown)
}

/// A failed, non-complete parser over `msg` as is.
pub fn fail(msg: Message) -> Parser {
    Parser::new(msg, Failed::Failed, Complete::Unknown)
}

/// A failed, non-complete parser carrying `status`.
pub fn fail_with(msg: Message, status: impl Into<Status>) -> Parser {
    fail(msg.set_status(status))
}

/// A complete, non-failed parser over `msg` as is.
pub fn complete(msg: Message) -> Parser {
    Parser::new(msg, Failed::Unknown, Complete::Complete)
}

/// Completes with `status` and `content` appended to the body.
pub fn complete_with_status(
    msg: Message,
    status: impl Into<Status>,
    content_type: &str,
    content: &str,
) -> Parser {
    complete(msg.output_status(status, content_type, content))
}

/// Completes with an error status and no body.
pub fn complete_with_error(msg: Message, status: impl Into<Status>) -> Parser {
    complete(msg.set_status(status))
}

/// Completes with a `401` authentication challenge and a body.
pub fn complete_with_challenge(
    msg: Message,
    challenge: &str,
    content_type: &str,
    content: &str,
) -> Parser {
    complete(msg.set_authentication_challenge_with_content(challenge, content_type, content))
}

/// Completes with `200 OK` and a body.
pub fn complete_ok(msg: Message, content_type: &str, content: &str) -> Parser {
    complete_with_status(msg, HttpCode::Ok, content_type, content)
}

/// Continues with `200 OK` and a body, leaving later filters free to run.
pub fn continue_ok(msg: Message, content_type: &str, content: &str) -> Parser {
    parse(msg.output_status(HttpCode::Ok, content_type, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::{RequestAdapter, WWW_AUTHENTICATE};
    use std::sync::Arc;

    fn message() -> Message {
        Message::new(Arc::new(RequestAdapter::new("GET", "/")))
    }

    #[test]
    fn predicates_over_all_flag_combinations() {
        let cases = [
            (Failed::Unknown, Complete::Unknown, false, false, false, false, true),
            (Failed::Failed, Complete::Unknown, true, false, true, true, false),
            (Failed::Unknown, Complete::Complete, false, true, true, false, true),
            (Failed::Failed, Complete::Complete, true, true, true, false, true),
        ];

        for (f, c, failed, complete, foc, fnc, nfoc) in cases {
            let p = Parser::new(message(), f, c);
            assert_eq!(p.failed(), failed, "{:?} {:?}", f, c);
            assert_eq!(p.complete(), complete, "{:?} {:?}", f, c);
            assert_eq!(p.failed_or_complete(), foc, "{:?} {:?}", f, c);
            assert_eq!(p.failed_not_complete(), fnc, "{:?} {:?}", f, c);
            assert_eq!(p.not_failed_or_complete(), nfoc, "{:?} {:?}", f, c);
        }
    }

    #[test]
    fn parse_keeps_message() {
        let p = parse(message().output("text/plain", "x"));
        assert_eq!(p.failed_flag(), Failed::Unknown);
        assert_eq!(p.complete_flag(), Complete::Unknown);
        assert_eq!(p.into_message().response_body(), "x");
    }

    #[test]
    fn fail_leaves_status_unset() {
        let p = fail(message());
        assert!(p.failed_not_complete());
        assert!(p.message().status().is_empty());
    }

    #[test]
    fn complete_with_status_outputs() {
        let p = complete_with_status(message(), Status::new(201, "Created"), "text/plain", "made");
        assert!(p.complete());
        assert!(!p.failed());
        assert_eq!(p.message().status().code(), 201);
        assert_eq!(p.message().response_body(), "made");
    }

    #[test]
    fn complete_with_error_has_no_body() {
        let p = complete_with_error(message(), HttpCode::Forbidden);
        assert!(p.complete());
        assert_eq!(p.message().status().code(), 403);
        assert!(p.message().response_body().is_empty());
    }

    #[test]
    fn complete_with_challenge_is_401() {
        let p = complete_with_challenge(message(), "MAC", "text/plain", "who are you\r\n");
        assert!(p.complete());
        assert_eq!(p.message().status().code(), 401);
        assert_eq!(p.message().response_header(WWW_AUTHENTICATE), Some("MAC"));
        assert_eq!(p.message().response_content_type(), Some("text/plain"));
    }

    #[test]
    fn ok_constructors_differ_only_in_completion() {
        let done = complete_ok(message(), "text/plain", "a");
        let more = continue_ok(message(), "text/plain", "a");

        assert!(done.complete());
        assert!(!more.failed_or_complete());
        assert_eq!(done.message().status(), more.message().status());
        assert_eq!(done.message().response_body(), more.message().response_body());
    }
}
