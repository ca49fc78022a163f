//! Client address resolution from proxy headers.

use std::net::{IpAddr, SocketAddr};

/// Address recorded when neither headers nor the transport yield one.
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Proxy headers consulted, in priority order.
pub const CLIENT_IP_HEADERS: [&str; 5] = [
    "CF-Connecting-IP",
    "X-Forwarded-For",
    "X-Real-IP",
    "True-Client-IP",
    "Forwarded",
];

/// Resolve the client address for a request.
///
/// `header` looks up a header value by name. The first header in
/// [`CLIENT_IP_HEADERS`] whose value parses as an IP address wins;
/// otherwise the transport peer's IP is used.
pub fn resolve_client_ip<'a, F>(header: F, peer: Option<SocketAddr>) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    for name in CLIENT_IP_HEADERS {
        let Some(value) = header(name) else {
            continue;
        };
        let ip = match name {
            "X-Forwarded-For" => value.split(',').next().and_then(parse_ip),
            "Forwarded" => forwarded_for(value).and_then(parse_node),
            _ => parse_ip(value),
        };
        if let Some(ip) = ip {
            return ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string())
}

/// Extract the `for=` node of the first element of an RFC 7239 header.
fn forwarded_for(value: &str) -> Option<&str> {
    let first = value.split(',').next()?;
    first.split(';').find_map(|pair| {
        let (key, node) = pair.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("for")
            .then(|| node.trim().trim_matches('"'))
    })
}

/// Parse a bare IP address. Ports and brackets are rejected.
fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.trim().parse().ok()
}

/// Parse a `Forwarded` node: a bare IP, a bracketed IPv6 literal, or
/// either with a port.
fn parse_node(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();
    if let Some(ip) = parse_ip(raw) {
        return Some(ip);
    }
    if let Ok(addr) = raw.parse::<SocketAddr>() {
        return Some(addr.ip());
    }
    raw.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .and_then(|inner| inner.parse::<IpAddr>().ok())
}
