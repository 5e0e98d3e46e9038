//! Composable HTTP request filters.
//!
//! A request is processed by a tree of small filters. Each filter looks at an
//! immutable [`Message`] and returns a [`Parser`]: the next message plus two
//! flags saying whether processing failed and whether a response is complete.
//! Filters are chained with `>>` and `<<` and combined with [`choice`],
//! [`option`] and [`on_error`]. An [`Evaluator`] runs the tree and commits
//! the outcome to the transport exactly once.
//!
//! # Core Types
//!
//! - [`Message`]: Immutable request view plus the response being built
//! - [`Parser`]: A message with its failed and complete flags
//! - [`Filter`] and [`Expr`]: Request transformers and their composition
//! - [`Context`]: The request and response sink for one evaluation
//! - [`Evaluator`]: Runs a tree and commits status, headers and body
//!
//! [`parse_bearer`] and [`parse_mac`] read `Authorization: Bearer` and
//! `Authorization: MAC` values. Parsed credentials never print their secrets.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use request_gate::web::{RecordedResponse, RequestAdapter};
//! use request_gate::{choice, method, on_error_complete, output, path, Context, Evaluator, Expr};
//!
//! let routes = choice([
//!     Expr::new(path("/ping").unwrap()) >> on_error_complete(method(["GET"])) >> output("text/plain", "pong"),
//! ]);
//! let evaluator = Evaluator::new(routes);
//!
//! let mut ctx = Context::new(Arc::new(RequestAdapter::new("POST", "/ping")), RecordedResponse::new());
//! evaluator.evaluate(&mut ctx).unwrap();
//! assert_eq!(ctx.response().status_line().code(), 405);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::print_stdout, clippy::print_stderr, clippy::dbg_macro)]

mod auth;
mod context;
mod error;
mod evaluator;
mod filter;
mod filters;
mod logging;
mod message;
mod parser;
mod status;
pub mod web;

pub use auth::{
    parse_bearer, parse_mac, BearerParser, BearerToken, MacHeader, NormalizedRequest,
    DEFAULT_MAX_TOKEN_LENGTH,
};
pub use context::Context;
pub use error::{Error, GrammarError, GrammarErrorKind, Scheme};
pub use evaluator::{evaluate, final_status, Evaluator, PARSING_FAILED};
pub use filter::{left_compose, right_compose, sequence, Expr, Filter, FilterExt};
pub use filters::{
    authorization, bearer_auth, choice, content, header, mac_auth, method, no_cache, on_error,
    on_error_complete, option, output, params, pass, path, rheader, Authorization, BearerAuth,
    BearerHandler, Choice, Content, ContentHandler, CredentialsHandler, FieldsHandler, Header,
    MacAuth, MacHandler, Method, NoCache, OnError, OnErrorComplete, OptionFilter, Output, Params,
    Pass, Path, RHeader, Required, BEARER_CHALLENGE, BEARER_MALFORMED, MAC_CHALLENGE,
    MAC_MALFORMED, MAX_FIELDS, MAX_PATH_PARTS,
};
pub use logging::EvalLog;
pub use message::{Message, ResponseHeaders};
pub use parser::{
    complete, complete_ok, complete_with_challenge, complete_with_error, complete_with_status,
    continue_ok, fail, fail_with, parse, Complete, Failed, Parser,
};
pub use status::{HttpCode, Status};
