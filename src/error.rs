use std::fmt;

/// Errors raised while building filters, parsing credentials outside a
/// filter, or committing a response.
///
/// Evaluating a filter chain never produces an `Error`: filter outcomes are
/// carried by [`Parser`](crate::Parser) flags and the message status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A path pattern failed to compile.
    InvalidPattern {
        /// The pattern as given
        pattern: String,
        /// The compiler's diagnostic
        message: String,
    },
    /// More field names were given than a filter can pass to its handler.
    TooManyFields {
        /// The filter being built
        filter: &'static str,
        /// The maximum number of names accepted
        max: usize,
        /// The number of names given
        given: usize,
    },
    /// The response of this context was already committed.
    AlreadyCommitted,
    /// An `Authorization` header value did not match its grammar.
    Grammar(GrammarError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPattern { pattern, message } => {
                write!(f, "invalid path pattern '{}': {}", pattern, message)
            }
            Error::TooManyFields { filter, max, given } => write!(
                f,
                "{} accepts at most {} field names, {} given",
                filter, max, given
            ),
            Error::AlreadyCommitted => write!(f, "response already committed"),
            Error::Grammar(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<GrammarError> for Error {
    fn from(e: GrammarError) -> Self {
        Error::Grammar(e)
    }
}

/// The authentication scheme a grammar error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Authorization: MAC id=.., ts=.., nonce=.., ext=.., mac=..`
    Mac,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Bearer => write!(f, "Bearer"),
            Scheme::Mac => write!(f, "MAC"),
        }
    }
}

/// A malformed `Authorization` header value.
///
/// The error never carries the rejected input, so it is safe to log.
///
/// # Examples
///
/// ```
/// use request_gate::{parse_bearer, GrammarErrorKind};
///
/// let err = parse_bearer("Bearer ").unwrap_err();
/// assert_eq!(err.kind(), GrammarErrorKind::EmptyToken);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError {
    scheme: Scheme,
    kind: GrammarErrorKind,
}

impl GrammarError {
    /// Creates a new grammar error.
    pub fn new(scheme: Scheme, kind: GrammarErrorKind) -> Self {
        Self { scheme, kind }
    }

    /// Returns the scheme being parsed.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the error kind.
    pub fn kind(&self) -> GrammarErrorKind {
        self.kind
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed {} credentials: {}", self.scheme, self.kind)
    }
}

impl std::error::Error for GrammarError {}

/// Why an `Authorization` header value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarErrorKind {
    /// The scheme literal is missing.
    MissingScheme,
    /// No whitespace between the scheme and its credentials.
    MissingSeparator,
    /// The Bearer token is empty.
    EmptyToken,
    /// The Bearer token exceeds the configured length.
    TokenTooLong,
    /// A character outside the allowed set.
    InvalidCharacter,
    /// An attribute is not of the form `name=value`.
    MalformedAttribute,
    /// An attribute name outside `id`, `ts`, `nonce`, `ext`, `mac`.
    UnknownAttribute,
    /// The same attribute appears twice.
    DuplicateAttribute,
    /// A required attribute is absent.
    MissingAttribute,
    /// A required attribute has an empty value.
    EmptyAttribute,
    /// `ts` is not a positive integer.
    InvalidTimestamp,
    /// Unparsed input after the credentials.
    TrailingInput,
}

impl fmt::Display for GrammarErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingScheme => write!(f, "missing scheme"),
            Self::MissingSeparator => write!(f, "missing separator"),
            Self::EmptyToken => write!(f, "empty token"),
            Self::TokenTooLong => write!(f, "token too long"),
            Self::InvalidCharacter => write!(f, "invalid character"),
            Self::MalformedAttribute => write!(f, "malformed attribute"),
            Self::UnknownAttribute => write!(f, "unknown attribute"),
            Self::DuplicateAttribute => write!(f, "duplicate attribute"),
            Self::MissingAttribute => write!(f, "missing attribute"),
            Self::EmptyAttribute => write!(f, "empty attribute"),
            Self::InvalidTimestamp => write!(f, "invalid timestamp"),
            Self::TrailingInput => write!(f, "trailing input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_filter() {
        let err = Error::TooManyFields {
            filter: "header",
            max: 3,
            given: 4,
        };
        assert_eq!(err.to_string(), "header accepts at most 3 field names, 4 given");
    }

    #[test]
    fn grammar_error_display_names_the_scheme() {
        let err = GrammarError::new(Scheme::Mac, GrammarErrorKind::InvalidTimestamp);
        assert_eq!(err.to_string(), "malformed MAC credentials: invalid timestamp");
        assert_eq!(err.scheme(), Scheme::Mac);
    }
}
