//! Capability traits at the boundary with the HTTP transport.
//!
//! The engine never talks to sockets or frameworks. It reads the request
//! through [`Request`] and writes the final response through [`Response`],
//! and the evaluator is the only caller of the latter.

/// Header carrying client credentials.
pub const AUTHORIZATION: &str = "Authorization";
/// Header carrying an authentication challenge.
pub const WWW_AUTHENTICATE: &str = "WWW-Authenticate";
/// Request and response body media type.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Request body length.
pub const CONTENT_LENGTH: &str = "Content-Length";
/// Original method, set by a proxy in front of the service.
pub const X_AUTH_METHOD: &str = "X-Auth-Method";
/// Original `Host` header, set by a proxy in front of the service.
pub const X_AUTH_HOST: &str = "X-Auth-Host";
/// Original request URL, set by a proxy in front of the service.
pub const X_AUTH_URL: &str = "X-Auth-URL";

/// Read-only view of an incoming HTTP request.
///
/// Implementations must be shareable across threads: the same request is
/// referenced by every [`Message`](crate::Message) derived while evaluating
/// it.
///
/// # Examples
///
/// ```
/// use request_gate::web::Request;
///
/// struct Fixed;
///
/// impl Request for Fixed {
///     fn method(&self) -> &str { "GET" }
///     fn path(&self) -> &str { "/items" }
///     fn query_string(&self) -> &str { "page=2" }
///     fn header(&self, _name: &str) -> Option<String> { None }
///     fn param(&self, _name: &str) -> Option<String> { None }
///     fn host_name_and_port(&self) -> (String, u16) { ("example.com".to_string(), 80) }
/// }
///
/// assert_eq!(Fixed.uri(), "/items?page=2");
/// assert_eq!(Fixed.port(), 80);
/// ```
pub trait Request: Send + Sync {
    /// The request method, exactly as received.
    fn method(&self) -> &str;

    /// The request path, without the query string.
    fn path(&self) -> &str;

    /// The raw query string, without the leading `?`.
    fn query_string(&self) -> &str;

    /// A request header value.
    fn header(&self, name: &str) -> Option<String>;

    /// A query or body parameter value.
    fn param(&self, name: &str) -> Option<String>;

    /// The host name and port the request was addressed to.
    fn host_name_and_port(&self) -> (String, u16);

    /// The port the request was addressed to.
    fn port(&self) -> u16 {
        self.host_name_and_port().1
    }

    /// The request target: path plus `?query` when a query string is present.
    fn uri(&self) -> String {
        let qs = self.query_string();
        if qs.is_empty() {
            self.path().to_string()
        } else {
            format!("{}?{}", self.path(), qs)
        }
    }

    /// The `Content-Type` header value.
    fn content_type(&self) -> Option<String> {
        self.header(CONTENT_TYPE)
    }

    /// The raw `Content-Length` header value.
    fn content_length(&self) -> Option<String> {
        self.header(CONTENT_LENGTH)
    }
}

/// Sink for the outgoing HTTP response.
pub trait Response {
    /// Sets the status line.
    fn status(&mut self, code: u16, phrase: &str);

    /// Sets a response header, replacing any previous value.
    fn set_header(&mut self, name: &str, value: &str);

    /// Appends to the response body.
    fn write(&mut self, body: &str);
}

impl<R: Response + ?Sized> Response for &mut R {
    fn status(&mut self, code: u16, phrase: &str) {
        (**self).status(code, phrase)
    }

    fn set_header(&mut self, name: &str, value: &str) {
        (**self).set_header(name, value)
    }

    fn write(&mut self, body: &str) {
        (**self).write(body)
    }
}
