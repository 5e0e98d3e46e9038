use std::fmt;
use std::sync::Arc;

use crate::filter::Filter;
use crate::message::Message;
use crate::parser::{complete, fail_with, parse, Parser};
use crate::status::HttpCode;
use crate::web::AUTHORIZATION;

/// Handler receiving the raw `Authorization` header value.
pub type CredentialsHandler = Arc<dyn Fn(&Message, &str) -> Parser + Send + Sync>;

/// Requires an `Authorization` header of any scheme.
#[derive(Clone, Default)]
pub struct Authorization {
    challenge: Option<String>,
    handler: Option<CredentialsHandler>,
}

/// An authorization filter with no challenge and no handler.
///
/// A present header is passed to the handler, or accepted as is. A missing
/// one completes with a `401` challenge when one is configured, and fails
/// with `401 Unauthorized` otherwise.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::RequestAdapter;
/// use request_gate::{authorization, Filter, Message};
///
/// let auth = authorization().challenge("Basic realm=\"api\"");
/// let msg = Message::new(Arc::new(RequestAdapter::new("GET", "/")));
/// let result = auth.apply(&msg);
///
/// assert!(result.complete());
/// assert_eq!(result.message().status().code(), 401);
/// assert_eq!(result.message().response_header("WWW-Authenticate"), Some("Basic realm=\"api\""));
/// ```
pub fn authorization() -> Authorization {
    Authorization::default()
}

impl Authorization {
    /// Sets the `WWW-Authenticate` challenge issued when the header is
    /// missing. An empty challenge disables it.
    pub fn challenge(mut self, challenge: impl Into<String>) -> Self {
        let challenge = challenge.into();
        self.challenge = (!challenge.is_empty()).then_some(challenge);
        self
    }

    /// Passes the header value to `handler`.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Message, &str) -> Parser + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }
}

impl Filter for Authorization {
    fn apply(&self, msg: &Message) -> Parser {
        match msg.request().header(AUTHORIZATION) {
            Some(value) => match &self.handler {
                Some(handler) => handler(msg, &value),
                None => parse(msg.clone()),
            },
            None => match &self.challenge {
                Some(challenge) => {
                    msg.log()
                        .debug(format_args!("authorization missing, challenging with {}", challenge));
                    complete(msg.set_authentication_challenge(challenge))
                }
                None => fail_with(msg.clone(), HttpCode::Unauthorized),
            },
        }
    }
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorization")
            .field("challenge", &self.challenge)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}
