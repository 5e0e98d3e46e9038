use std::fmt;

use crate::error::{GrammarError, GrammarErrorKind, Scheme};

use super::is_http_space;

/// Longest token [`BearerParser::default`] accepts.
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 1024;

const SCHEME: &str = "Bearer";

/// A Bearer access token.
///
/// The token is only reachable through [`expose_secret`](Self::expose_secret);
/// `Debug` and `Display` print `[REDACTED]`.
///
/// # Examples
///
/// ```
/// use request_gate::parse_bearer;
///
/// let token = parse_bearer("Bearer abc123").unwrap();
/// assert_eq!(token.expose_secret(), "abc123");
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// ```
// Do not derive Debug or Display: both must stay redacted.
pub struct BearerToken {
    inner: String,
}

impl BearerToken {
    fn new(token: &str) -> Self {
        Self {
            inner: token.to_string(),
        }
    }

    /// The raw token. Never log the result.
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// Token length in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Always false for a parsed token.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Parser for `Authorization: Bearer <token>`.
///
/// The value is the case-sensitive literal `Bearer`, at least one
/// whitespace character, then a token of `1..=max_token_length` characters
/// from `[A-Za-z0-9-._~+/=]`. Whitespace around the whole value is ignored;
/// anything after the token is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BearerParser {
    max_token_length: usize,
}

impl Default for BearerParser {
    fn default() -> Self {
        Self {
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
        }
    }
}

impl BearerParser {
    /// A parser accepting tokens up to [`DEFAULT_MAX_TOKEN_LENGTH`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the longest accepted token.
    pub fn with_max_token_length(mut self, max: usize) -> Self {
        self.max_token_length = max;
        self
    }

    /// The longest accepted token.
    pub fn max_token_length(&self) -> usize {
        self.max_token_length
    }

    /// Parses a header value.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] naming the first rule the value breaks.
    pub fn parse(&self, value: &str) -> Result<BearerToken, GrammarError> {
        let err = |kind| GrammarError::new(Scheme::Bearer, kind);

        let value = value.trim_matches(is_http_space);
        let rest = value
            .strip_prefix(SCHEME)
            .ok_or_else(|| err(GrammarErrorKind::MissingScheme))?;

        if rest.is_empty() {
            return Err(err(GrammarErrorKind::EmptyToken));
        }
        if !rest.starts_with(is_http_space) {
            return Err(err(GrammarErrorKind::MissingSeparator));
        }

        let rest = rest.trim_start_matches(is_http_space);
        let end = rest.find(is_http_space).unwrap_or(rest.len());
        let (token, trailing) = rest.split_at(end);

        if !token.chars().all(is_token_char) {
            return Err(err(GrammarErrorKind::InvalidCharacter));
        }
        if token.is_empty() {
            return Err(err(GrammarErrorKind::EmptyToken));
        }
        if token.len() > self.max_token_length {
            return Err(err(GrammarErrorKind::TokenTooLong));
        }
        if !trailing.is_empty() {
            return Err(err(GrammarErrorKind::TrailingInput));
        }

        Ok(BearerToken::new(token))
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '+' | '/' | '=')
}

/// Parses a Bearer header value with the default token length.
///
/// # Errors
///
/// See [`BearerParser::parse`].
pub fn parse_bearer(value: &str) -> Result<BearerToken, GrammarError> {
    BearerParser::default().parse(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(value: &str) -> GrammarErrorKind {
        parse_bearer(value).unwrap_err().kind()
    }

    #[test]
    fn simple_token() {
        assert_eq!(parse_bearer("Bearer abc123").unwrap().expose_secret(), "abc123");
    }

    #[test]
    fn full_character_set() {
        let token = "AZaz09-._~+/=";
        let parsed = parse_bearer(&format!("Bearer {token}")).unwrap();
        assert_eq!(parsed.expose_secret(), token);
        assert_eq!(parsed.len(), token.len());
        assert!(!parsed.is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_bearer("  Bearer \t  tok  ").unwrap().expose_secret(), "tok");
    }

    #[test]
    fn rejects_with_precise_kind() {
        assert_eq!(kind(""), GrammarErrorKind::MissingScheme);
        assert_eq!(kind("bearer abc"), GrammarErrorKind::MissingScheme);
        assert_eq!(kind("Basic abc"), GrammarErrorKind::MissingScheme);
        assert_eq!(kind("Bearer "), GrammarErrorKind::EmptyToken);
        assert_eq!(kind("Bearer"), GrammarErrorKind::EmptyToken);
        assert_eq!(kind("Bearerabc"), GrammarErrorKind::MissingSeparator);
        assert_eq!(kind("Bearer ab$c"), GrammarErrorKind::InvalidCharacter);
        assert_eq!(kind("Bearer abc def"), GrammarErrorKind::TrailingInput);
        assert_eq!(kind("Bearer tök"), GrammarErrorKind::InvalidCharacter);
    }

    #[test]
    fn length_bounds() {
        let ok = "a".repeat(DEFAULT_MAX_TOKEN_LENGTH);
        let long = "a".repeat(DEFAULT_MAX_TOKEN_LENGTH + 1);
        assert!(parse_bearer(&format!("Bearer {ok}")).is_ok());
        assert_eq!(kind(&format!("Bearer {long}")), GrammarErrorKind::TokenTooLong);
    }

    #[test]
    fn configurable_length() {
        let parser = BearerParser::new().with_max_token_length(4);
        assert_eq!(parser.max_token_length(), 4);
        assert!(parser.parse("Bearer abcd").is_ok());
        assert!(parser.parse("Bearer abcde").is_err());
    }

    #[test]
    fn token_is_redacted() {
        let token = parse_bearer("Bearer s3cr3t").unwrap();
        assert_eq!(format!("{:?}", token), "[REDACTED]");
        assert_eq!(format!("{}", token), "[REDACTED]");
    }

    #[test]
    fn error_does_not_echo_input() {
        let err = parse_bearer("Bearer s3cr3t!").unwrap_err();
        assert!(!err.to_string().contains("s3cr3t"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn valid_tokens_round_trip(token in "[A-Za-z0-9._~+/=-]{1,64}") {
                let parsed = parse_bearer(&format!("Bearer {token}")).unwrap();
                prop_assert_eq!(parsed.expose_secret(), token.as_str());
            }

            #[test]
            fn any_forbidden_char_rejects(
                prefix in "[a-z]{0,8}",
                bad in "[!#$%&*(),;:<>?@\\[\\]{}|^`\"']",
                suffix in "[a-z]{0,8}",
            ) {
                let value = format!("Bearer {prefix}{bad}{suffix}");
                prop_assert!(parse_bearer(&value).is_err());
            }

            #[test]
            fn never_panics(value in ".{0,64}") {
                let _ = parse_bearer(&value);
            }
        }
    }
}
