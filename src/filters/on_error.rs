use crate::filter::{Expr, Filter};
use crate::message::Message;
use crate::parser::{complete, parse, Parser};
use crate::status::Status;

/// Delegates to a handler when a filter fails or produces an error status.
#[derive(Debug, Clone)]
pub struct OnError {
    expr: Expr,
    handler: Expr,
}

/// Runs `expr`; if it failed, or its status is an error, returns
/// `handler` applied to `expr`'s message. Otherwise the chain continues
/// with the original message.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{complete, method, on_error, Filter, Message};
///
/// let f = on_error(method(["GET"]), |msg: &Message| {
///     complete(msg.output("text/plain", "use GET\r\n"))
/// });
///
/// let msg = Message::new(Arc::new(RequestAdapter::new("POST", "/")));
/// let result = f.apply(&msg);
/// assert!(result.complete());
/// assert_eq!(result.message().status().code(), 405);
/// ```
pub fn on_error(expr: impl Filter + 'static, handler: impl Filter + 'static) -> OnError {
    OnError {
        expr: Expr::new(expr),
        handler: Expr::new(handler),
    }
}

fn is_error(result: &Parser) -> bool {
    result.failed() || result.message().status().has_error()
}

impl Filter for OnError {
    fn apply(&self, msg: &Message) -> Parser {
        let result = self.expr.apply(msg);
        if is_error(&result) {
            self.handler.apply(result.message())
        } else {
            parse(msg.clone())
        }
    }
}

/// Turns a failure into the final answer.
#[derive(Debug, Clone)]
pub struct OnErrorComplete {
    expr: Expr,
    status: Option<Status>,
}

/// Runs `expr`; if it failed or its status is an error, and it has not
/// already completed, completes with that message. Any other result is
/// returned as is.
///
/// A failed method check inside a route thus answers `405` instead of
/// letting an enclosing [`choice`](crate::choice) fall through to `404`.
pub fn on_error_complete(expr: impl Filter + 'static) -> OnErrorComplete {
    OnErrorComplete {
        expr: Expr::new(expr),
        status: None,
    }
}

impl OnErrorComplete {
    /// Completes with `status` instead of the status the failure carried.
    pub fn with_status(mut self, status: impl Into<Status>) -> Self {
        self.status = Some(status.into());
        self
    }
}

impl Filter for OnErrorComplete {
    fn apply(&self, msg: &Message) -> Parser {
        let result = self.expr.apply(msg);
        if result.complete() || !is_error(&result) {
            return result;
        }
        match &self.status {
            Some(status) => complete(result.message().set_status(status.clone())),
            None => complete(result.into_message()),
        }
    }
}
