use std::fmt;
use std::sync::Arc;

use crate::auth::{BearerParser, BearerToken};
use crate::filter::Filter;
use crate::message::Message;
use crate::parser::{complete_with_challenge, complete_with_status, parse, Parser};
use crate::status::HttpCode;
use crate::web::AUTHORIZATION;

/// Body sent with the `401` Bearer challenge.
pub const BEARER_CHALLENGE: &str = "Please provide the Bearer Authorization header\r\n";

/// Body sent when a Bearer header does not parse.
pub const BEARER_MALFORMED: &str = "The Bearer Authorization header is malformed or not valid\r\n";

/// Handler receiving a parsed Bearer token.
pub type BearerHandler = Arc<dyn Fn(&Message, &BearerToken) -> Parser + Send + Sync>;

/// Authenticates requests with `Authorization: Bearer <token>`.
#[derive(Clone, Default)]
pub struct BearerAuth {
    parser: BearerParser,
    handler: Option<BearerHandler>,
}

/// A Bearer filter passing valid tokens to `handler`.
///
/// - A missing or empty header completes with `401`,
///   `WWW-Authenticate: Bearer` and [`BEARER_CHALLENGE`].
/// - A malformed header completes with `400` and [`BEARER_MALFORMED`].
/// - A valid token is handed to `handler`, which decides the outcome.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{bearer_auth, complete_with_error, parse, Filter, HttpCode, Message};
///
/// let auth = bearer_auth(|msg, token| {
///     if token.expose_secret() == "letmein" {
///         parse(msg.clone())
///     } else {
///         complete_with_error(msg.clone(), HttpCode::Forbidden)
///     }
/// });
///
/// let req = RequestAdapter::new("GET", "/").with_header("Authorization", "Bearer letmein");
/// assert!(!auth.apply(&Message::new(Arc::new(req))).failed_or_complete());
/// ```
pub fn bearer_auth<F>(handler: F) -> BearerAuth
where
    F: Fn(&Message, &BearerToken) -> Parser + Send + Sync + 'static,
{
    BearerAuth::default().handler(handler)
}

impl BearerAuth {
    /// A filter that validates the header and passes valid requests on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the handler for valid tokens.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Message, &BearerToken) -> Parser + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Changes the longest accepted token.
    pub fn with_max_token_length(mut self, max: usize) -> Self {
        self.parser = self.parser.with_max_token_length(max);
        self
    }
}

impl Filter for BearerAuth {
    fn apply(&self, msg: &Message) -> Parser {
        let value = match msg.request().header(AUTHORIZATION) {
            Some(v) if !v.is_empty() => v,
            _ => {
                msg.log().debug(format_args!("bearer credentials missing, issuing challenge"));
                return complete_with_challenge(msg.clone(), "Bearer", "text/plain", BEARER_CHALLENGE);
            }
        };

        let token = match self.parser.parse(&value) {
            Ok(token) => token,
            Err(e) => {
                msg.log().warn(format_args!("rejected authorization header: {}", e));
                return complete_with_status(
                    msg.clone(),
                    HttpCode::BadRequest,
                    "text/plain",
                    BEARER_MALFORMED,
                );
            }
        };

        match &self.handler {
            Some(handler) => handler(msg, &token),
            None => parse(msg.clone()),
        }
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("parser", &self.parser)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}
