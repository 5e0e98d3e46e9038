use std::fmt;

use crate::error::{GrammarError, GrammarErrorKind, Scheme};

use super::is_http_space;

const SCHEME: &str = "MAC";

/// The attributes of an `Authorization: MAC` header.
///
/// `id`, `nonce` and `mac` are non-empty and `ts` is positive. `ext` may be
/// empty. The `mac` value is redacted from `Debug` and `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct MacHeader {
    id: String,
    ts: u64,
    nonce: String,
    ext: String,
    mac: String,
}

impl MacHeader {
    /// Key identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Request timestamp, in seconds.
    pub fn ts(&self) -> u64 {
        self.ts
    }

    /// Unique value chosen by the client for this timestamp.
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Application-specific extension data.
    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// The request signature to verify. Never log the result.
    pub fn mac(&self) -> &str {
        &self.mac
    }
}

impl fmt::Debug for MacHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacHeader")
            .field("id", &self.id)
            .field("ts", &self.ts)
            .field("nonce", &self.nonce)
            .field("ext", &self.ext)
            .field("mac", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for MacHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MAC id=\"{}\", ts=\"{}\", nonce=\"{}\", ext=\"{}\", mac=[REDACTED]",
            self.id, self.ts, self.nonce, self.ext
        )
    }
}

/// The request elements a MAC is computed over.
///
/// [`normalize`](Self::normalize) joins them into the string both client
/// and server sign. The field order is part of the wire contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRequest {
    /// Timestamp from the header
    pub ts: u64,
    /// Nonce from the header
    pub nonce: String,
    /// Request method, as received
    pub method: String,
    /// Request target
    pub uri: String,
    /// Host name, as received
    pub host: String,
    /// Port
    pub port: u16,
    /// Extension data from the header
    pub ext: String,
}

impl NormalizedRequest {
    /// Combines a parsed header with the resolved request elements.
    pub fn new(
        header: &MacHeader,
        method: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            ts: header.ts,
            nonce: header.nonce.clone(),
            method: method.into(),
            uri: uri.into(),
            host: host.into(),
            port,
            ext: header.ext.clone(),
        }
    }

    /// The normalized request string.
    ///
    /// Seven newline-terminated lines: `ts`, `nonce`, the method in upper
    /// case, `uri`, the host in lower case, `port`, `ext`.
    ///
    /// # Examples
    ///
    /// ```
    /// use request_gate::NormalizedRequest;
    ///
    /// let req = NormalizedRequest {
    ///     ts: 123456,
    ///     nonce: "xyz123".into(),
    ///     method: "PoSt".into(),
    ///     uri: "/r".into(),
    ///     host: "ExaMple.Com".into(),
    ///     port: 80,
    ///     ext: "a,b,c".into(),
    /// };
    /// assert_eq!(req.normalize(), "123456\nxyz123\nPOST\n/r\nexample.com\n80\na,b,c\n");
    /// ```
    pub fn normalize(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
            self.ts,
            self.nonce,
            self.method.to_ascii_uppercase(),
            self.uri,
            self.host.to_ascii_lowercase(),
            self.port,
            self.ext
        )
    }
}

#[derive(Default)]
struct Attributes<'a> {
    id: Option<&'a str>,
    ts: Option<&'a str>,
    nonce: Option<&'a str>,
    ext: Option<&'a str>,
    mac: Option<&'a str>,
}

impl<'a> Attributes<'a> {
    fn slot(&mut self, name: &str) -> Option<&mut Option<&'a str>> {
        match name {
            "id" => Some(&mut self.id),
            "ts" => Some(&mut self.ts),
            "nonce" => Some(&mut self.nonce),
            "ext" => Some(&mut self.ext),
            "mac" => Some(&mut self.mac),
            _ => None,
        }
    }
}

/// Position-tracking reader over a header value.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_space(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start_matches(is_http_space).len();
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }
}

// Values never carry control characters, quoted or not.
fn attribute_value<'a>(cur: &mut Cursor<'a>) -> Result<&'a str, GrammarErrorKind> {
    if cur.eat('"') {
        let value = cur.take_while(|c| c != '"' && !c.is_control());
        if !cur.eat('"') {
            return Err(GrammarErrorKind::MalformedAttribute);
        }
        Ok(value)
    } else {
        let value =
            cur.take_while(|c| !is_http_space(c) && !c.is_control() && c != ',' && c != '"');
        match cur.peek() {
            Some(c) if c.is_control() && !is_http_space(c) => {
                Err(GrammarErrorKind::MalformedAttribute)
            }
            _ => Ok(value),
        }
    }
}

fn attributes(input: &str) -> Result<Attributes<'_>, GrammarErrorKind> {
    let mut cur = Cursor { input, pos: 0 };
    let mut attrs = Attributes::default();

    cur.skip_space();
    if cur.at_end() {
        return Err(GrammarErrorKind::MissingAttribute);
    }

    loop {
        let name = cur.take_while(|c| c.is_ascii_alphabetic());
        if name.is_empty() {
            return Err(GrammarErrorKind::MalformedAttribute);
        }
        cur.skip_space();
        if !cur.eat('=') {
            return Err(GrammarErrorKind::MalformedAttribute);
        }
        cur.skip_space();
        let value = attribute_value(&mut cur)?;

        let slot = attrs
            .slot(name)
            .ok_or(GrammarErrorKind::UnknownAttribute)?;
        if slot.replace(value).is_some() {
            return Err(GrammarErrorKind::DuplicateAttribute);
        }

        cur.skip_space();
        if cur.at_end() {
            return Ok(attrs);
        }
        if !cur.eat(',') {
            return Err(GrammarErrorKind::TrailingInput);
        }
        cur.skip_space();
        if cur.at_end() {
            return Err(GrammarErrorKind::MalformedAttribute);
        }
    }
}

fn required(value: Option<&str>) -> Result<String, GrammarErrorKind> {
    match value {
        None => Err(GrammarErrorKind::MissingAttribute),
        Some("") => Err(GrammarErrorKind::EmptyAttribute),
        Some(v) => Ok(v.to_string()),
    }
}

fn timestamp(value: Option<&str>) -> Result<u64, GrammarErrorKind> {
    let raw = value.ok_or(GrammarErrorKind::MissingAttribute)?;
    match raw.parse::<u64>() {
        Ok(ts) if ts > 0 => Ok(ts),
        _ => Err(GrammarErrorKind::InvalidTimestamp),
    }
}

fn header(value: &str) -> Result<MacHeader, GrammarErrorKind> {
    let value = value.trim_matches(is_http_space);
    let rest = value
        .strip_prefix(SCHEME)
        .ok_or(GrammarErrorKind::MissingScheme)?;
    if !rest.is_empty() && !rest.starts_with(is_http_space) {
        return Err(GrammarErrorKind::MissingSeparator);
    }

    let attrs = attributes(rest)?;
    Ok(MacHeader {
        id: required(attrs.id)?,
        ts: timestamp(attrs.ts)?,
        nonce: required(attrs.nonce)?,
        ext: attrs.ext.unwrap_or_default().to_string(),
        mac: required(attrs.mac)?,
    })
}

/// Parses an `Authorization: MAC` header value.
///
/// Attributes are comma-separated `name=value` pairs in any order, with
/// values quoted or bare. Whitespace, including line breaks, is allowed
/// around names, `=` and commas.
///
/// # Errors
///
/// Returns a [`GrammarError`] when the scheme is not `MAC`, an attribute is
/// unknown or repeated, `id`, `nonce` or `mac` is absent or empty, or `ts`
/// is absent or not a positive integer.
///
/// # Examples
///
/// ```
/// use request_gate::parse_mac;
///
/// let h = parse_mac(r#"MAC id="h480djs93hd8", ts="1336363200", nonce="dj83hs9s", mac="bhCQXTVyfj5cmA9uKkPFx1zeOXM=""#).unwrap();
/// assert_eq!(h.id(), "h480djs93hd8");
/// assert_eq!(h.ts(), 1336363200);
/// assert_eq!(h.ext(), "");
/// ```
pub fn parse_mac(value: &str) -> Result<MacHeader, GrammarError> {
    header(value).map_err(|kind| GrammarError::new(Scheme::Mac, kind))
}
