use std::fmt;
use std::sync::Arc;

use crate::auth::{parse_mac, MacHeader, NormalizedRequest};
use crate::filter::Filter;
use crate::message::Message;
use crate::parser::{complete_with_challenge, complete_with_status, parse, Parser};
use crate::status::HttpCode;
use crate::web::{host_name_and_port, Request, AUTHORIZATION, X_AUTH_HOST, X_AUTH_METHOD, X_AUTH_URL};

/// Body sent with the `401` MAC challenge.
pub const MAC_CHALLENGE: &str = "Please provide the MAC Authorization header\r\n";

/// Body sent when a MAC header does not parse.
pub const MAC_MALFORMED: &str = "The MAC Authorization header is malformed or not valid\r\n";

/// Handler receiving a parsed MAC header and the request it signs.
pub type MacHandler = Arc<dyn Fn(&Message, &MacHeader, &NormalizedRequest) -> Parser + Send + Sync>;

/// Authenticates requests with `Authorization: MAC ...`.
///
/// The filter does not compute or compare signatures. It hands the parsed
/// header and the [`NormalizedRequest`] to a handler, which verifies the
/// `mac` against `normalize()` with the client's key.
#[derive(Clone, Default)]
pub struct MacAuth {
    handler: Option<MacHandler>,
}

/// A MAC filter passing valid headers to `handler`.
///
/// - A missing or empty header completes with `401`,
///   `WWW-Authenticate: MAC` and [`MAC_CHALLENGE`].
/// - A malformed header completes with `400` and [`MAC_MALFORMED`].
///
/// The signed method, host, port and URI are normally the request's own.
/// Behind a proxy that sets a non-empty `X-Auth-Method`, they come from
/// `X-Auth-Method`, `X-Auth-Host` and `X-Auth-URL` instead; a missing
/// `X-Auth-Host` then yields an empty host and port `0`, and a missing
/// `X-Auth-URL` an empty URI.
pub fn mac_auth<F>(handler: F) -> MacAuth
where
    F: Fn(&Message, &MacHeader, &NormalizedRequest) -> Parser + Send + Sync + 'static,
{
    MacAuth {
        handler: Some(Arc::new(handler)),
    }
}

impl MacAuth {
    /// A filter that validates the header and passes valid requests on.
    pub fn new() -> Self {
        Self::default()
    }
}

struct SigningInputs {
    method: String,
    host: String,
    port: u16,
    uri: String,
}

fn signing_inputs(req: &dyn Request) -> SigningInputs {
    match req.header(X_AUTH_METHOD).filter(|m| !m.is_empty()) {
        Some(method) => {
            let (host, port) = req
                .header(X_AUTH_HOST)
                .map(|h| host_name_and_port(&h, req.port()))
                .unwrap_or_default();
            SigningInputs {
                method,
                host,
                port,
                uri: req.header(X_AUTH_URL).unwrap_or_default(),
            }
        }
        None => {
            let (host, port) = req.host_name_and_port();
            SigningInputs {
                method: req.method().to_string(),
                host,
                port,
                uri: req.uri(),
            }
        }
    }
}

impl Filter for MacAuth {
    fn apply(&self, msg: &Message) -> Parser {
        let value = match msg.request().header(AUTHORIZATION) {
            Some(v) if !v.is_empty() => v,
            _ => {
                msg.log().debug(format_args!("MAC credentials missing, issuing challenge"));
                return complete_with_challenge(msg.clone(), "MAC", "text/plain", MAC_CHALLENGE);
            }
        };

        let header = match parse_mac(&value) {
            Ok(header) => header,
            Err(e) => {
                msg.log().warn(format_args!("rejected authorization header: {}", e));
                return complete_with_status(
                    msg.clone(),
                    HttpCode::BadRequest,
                    "text/plain",
                    MAC_MALFORMED,
                );
            }
        };

        let Some(handler) = &self.handler else {
            return parse(msg.clone());
        };

        let inputs = signing_inputs(msg.request());
        let normalized =
            NormalizedRequest::new(&header, inputs.method, inputs.host, inputs.port, inputs.uri);
        handler(msg, &header, &normalized)
    }
}

impl fmt::Debug for MacAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacAuth")
            .field("handler", &self.handler.is_some())
            .finish()
    }
}
