//! Grammars for the `Authorization` header schemes.
//!
//! Each scheme has its own hand-written parser: the Bearer and MAC grammars
//! share no token set and report different errors. Parsed credentials
//! redact themselves in `Debug` and `Display` output.

mod bearer;
mod mac;

pub use bearer::{parse_bearer, BearerParser, BearerToken, DEFAULT_MAX_TOKEN_LENGTH};
pub use mac::{parse_mac, MacHeader, NormalizedRequest};

pub(crate) fn is_http_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
