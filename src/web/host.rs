/// Splits a `Host` header value into host name and port.
///
/// - An empty value yields `("", 0)`.
/// - The last `:` separates the port. Only its leading digits count, so
///   `80abc` is port `80`. No digits, a negative value or a value above
///   `65535` yields `0`.
/// - Without a port, `default_port` is used.
/// - A bracketed IPv6 literal is only split after its closing bracket.
///
/// # Examples
///
/// ```
/// use request_gate::web::host_name_and_port;
///
/// assert_eq!(host_name_and_port("secure.com:8080", 80), ("secure.com".to_string(), 8080));
/// assert_eq!(host_name_and_port("example.com", 443), ("example.com".to_string(), 443));
/// assert_eq!(host_name_and_port("", 80), (String::new(), 0));
/// ```
pub fn host_name_and_port(host_header: &str, default_port: u16) -> (String, u16) {
    if host_header.is_empty() {
        return (String::new(), 0);
    }

    match host_header.rfind(':') {
        Some(pos) if !host_header[pos..].contains(']') => {
            (host_header[..pos].to_string(), leading_port(&host_header[pos + 1..]))
        }
        _ => (host_header.to_string(), default_port),
    }
}

// Leading decimal digits after optional whitespace and sign.
fn leading_port(raw: &str) -> u16 {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if negative {
        return 0;
    }
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse::<u16>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_last_colon() {
        assert_eq!(
            host_name_and_port("[::1]:8443", 80),
            ("[::1]".to_string(), 8443)
        );
    }

    #[test]
    fn bracketed_ipv6_without_port_uses_default() {
        assert_eq!(host_name_and_port("[::1]", 80), ("[::1]".to_string(), 80));
    }

    #[test]
    fn non_numeric_port_is_zero() {
        assert_eq!(
            host_name_and_port("example.com:http", 80),
            ("example.com".to_string(), 0)
        );
        assert_eq!(host_name_and_port("example.com:", 80), ("example.com".to_string(), 0));
    }

    #[test]
    fn port_uses_leading_digits_only() {
        assert_eq!(
            host_name_and_port("example.com:80abc", 443),
            ("example.com".to_string(), 80)
        );
        assert_eq!(
            host_name_and_port("example.com: 8080 ", 443),
            ("example.com".to_string(), 8080)
        );
        assert_eq!(host_name_and_port("example.com:+81", 443), ("example.com".to_string(), 81));
    }

    #[test]
    fn out_of_range_port_is_zero() {
        assert_eq!(host_name_and_port("example.com:65536", 80), ("example.com".to_string(), 0));
        assert_eq!(host_name_and_port("example.com:-1", 80), ("example.com".to_string(), 0));
        assert_eq!(
            host_name_and_port("example.com:65535", 80),
            ("example.com".to_string(), 65535)
        );
    }
}
