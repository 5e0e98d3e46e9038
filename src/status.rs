use std::fmt;

/// HTTP status codes the engine produces on its own.
///
/// Filters are free to set any other code through [`Status::new`]; these are
/// the ones the built-in filters and the evaluator emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpCode {
    /// 200
    Ok,
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 405
    MethodNotAllowed,
    /// 415
    UnsupportedMediaType,
    /// 500
    InternalServerError,
}

impl HttpCode {
    /// The numeric status code.
    pub fn code(self) -> u16 {
        match self {
            HttpCode::Ok => 200,
            HttpCode::BadRequest => 400,
            HttpCode::Unauthorized => 401,
            HttpCode::Forbidden => 403,
            HttpCode::NotFound => 404,
            HttpCode::MethodNotAllowed => 405,
            HttpCode::UnsupportedMediaType => 415,
            HttpCode::InternalServerError => 500,
        }
    }

    /// The canonical reason phrase.
    pub fn phrase(self) -> &'static str {
        match self {
            HttpCode::Ok => "OK",
            HttpCode::BadRequest => "Bad Request",
            HttpCode::Unauthorized => "Unauthorized",
            HttpCode::Forbidden => "Forbidden",
            HttpCode::NotFound => "Not Found",
            HttpCode::MethodNotAllowed => "Method Not Allowed",
            HttpCode::UnsupportedMediaType => "Unsupported Media Type",
            HttpCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// The response status of an HTTP transaction: a code and a reason phrase.
///
/// A code of `0` means "unset". The default value is unset.
///
/// # Examples
///
/// ```
/// use request_gate::{HttpCode, Status};
///
/// let unset = Status::default();
/// assert!(unset.is_empty());
/// assert!(!unset.has_error());
///
/// let status: Status = HttpCode::MethodNotAllowed.into();
/// assert_eq!(status.code(), 405);
/// assert!(status.has_error());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Status {
    code: u16,
    phrase: String,
}

impl Status {
    /// Creates a status from a code and a phrase.
    pub fn new(code: u16, phrase: impl Into<String>) -> Self {
        Self {
            code,
            phrase: phrase.into(),
        }
    }

    /// Returns true if the code is zero.
    pub fn is_empty(&self) -> bool {
        self.code == 0
    }

    /// The numeric status code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The reason phrase.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Whether the code is 400 or greater.
    pub fn has_error(&self) -> bool {
        self.code >= HttpCode::BadRequest.code()
    }
}

impl From<HttpCode> for Status {
    fn from(code: HttpCode) -> Self {
        Status::new(code.code(), code.phrase())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_unset() {
        let status = Status::default();
        assert!(status.is_empty());
        assert_eq!(status.code(), 0);
        assert!(status.phrase().is_empty());
        assert!(!status.has_error());
    }

    #[test]
    fn error_threshold_is_400() {
        assert!(!Status::new(399, "Whatever").has_error());
        assert!(Status::new(400, "Bad Request").has_error());
        assert!(Status::new(503, "Service Unavailable").has_error());
    }

    #[test]
    fn equality_is_by_fields() {
        assert_eq!(Status::new(404, "Not Found"), HttpCode::NotFound.into());
        assert_ne!(Status::new(404, "Gone Fishing"), HttpCode::NotFound.into());
    }

    #[test]
    fn display_shows_code_and_phrase() {
        let status: Status = HttpCode::UnsupportedMediaType.into();
        assert_eq!(status.to_string(), "415 Unsupported Media Type");
    }
}
