use std::fmt;

use crate::context::Context;
use crate::error::Error;
use crate::filter::{sequence, Expr, Filter};
use crate::parser::{parse, Parser};
use crate::status::{HttpCode, Status};
use crate::web::Response;

/// Phrase of the `500` committed when a chain fails without setting a status.
pub const PARSING_FAILED: &str = "Request parsing failed.";

/// Runs a filter tree against requests and commits the outcome.
///
/// An `Evaluator` owns a compiled tree and can be shared by every request a
/// service handles, across threads. It is the only component that writes to
/// a [`Response`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::{RecordedResponse, RequestAdapter};
/// use request_gate::{method, output, Context, Evaluator, Expr};
///
/// let evaluator = Evaluator::new(Expr::new(method(["GET"])) >> output("text/plain", "hi"));
///
/// let mut ctx = Context::new(Arc::new(RequestAdapter::new("GET", "/")), RecordedResponse::new());
/// evaluator.evaluate(&mut ctx).unwrap();
///
/// let resp = ctx.into_response();
/// assert_eq!(resp.status_line().code(), 200);
/// assert_eq!(resp.body(), "hi");
/// ```
#[derive(Clone)]
pub struct Evaluator {
    expr: Expr,
}

impl Evaluator {
    /// Wraps a filter tree.
    pub fn new(expr: impl Filter + 'static) -> Self {
        Self {
            expr: Expr::new(expr),
        }
    }

    /// Evaluates the tree for the request in `ctx` and commits the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyCommitted`] if `ctx` was already committed;
    /// the tree is not run in that case.
    pub fn evaluate<R: Response>(&self, ctx: &mut Context<R>) -> Result<Parser, Error> {
        evaluate(ctx, &self.expr)
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator").finish_non_exhaustive()
    }
}

/// The status committed for an outcome.
///
/// An explicit status wins. Otherwise a failure becomes
/// `500 Request parsing failed.` and anything else `200 OK`.
pub fn final_status(result: &Parser) -> Status {
    let status = result.message().status();
    if !status.is_empty() {
        status.clone()
    } else if result.failed() {
        Status::new(HttpCode::InternalServerError.code(), PARSING_FAILED)
    } else {
        HttpCode::Ok.into()
    }
}

/// Evaluates `expr` for the request in `ctx` and commits the result.
///
/// Builds the first message, runs the tree, resolves the final status and
/// writes status, headers and body to the response exactly once. Returns
/// the outcome with the committed status on its message.
///
/// # Errors
///
/// Returns [`Error::AlreadyCommitted`] if `ctx` was already committed.
pub fn evaluate<R, F>(ctx: &mut Context<R>, expr: &F) -> Result<Parser, Error>
where
    R: Response,
    F: Filter + ?Sized,
{
    if ctx.is_committed() {
        return Err(Error::AlreadyCommitted);
    }

    let result = sequence(parse(ctx.message()), expr);
    let status = final_status(&result);
    let (failed, complete) = (result.failed_flag(), result.complete_flag());
    let msg = result.into_message().set_status(status);

    ctx.commit(&msg)?;
    msg.log().debug(format_args!(
        "committed {} (failed={:?}, complete={:?})",
        msg.status(),
        failed,
        complete
    ));

    Ok(Parser::new(msg, failed, complete))
}
