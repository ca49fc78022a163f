//! Request extractors.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts},
};
use honeypot_core::resolve_client_ip;

/// Resolved client address.
///
/// Proxy headers are tried first; the socket peer is the fallback. See
/// [`resolve_client_ip`] for the order.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let headers = &parts.headers;
        let ip = resolve_client_ip(|name| headers.get(name).and_then(|v| v.to_str().ok()), peer);

        Ok(ClientIp(ip))
    }
}

/// Raw `User-Agent` header, empty when absent.
///
/// Untrusted; escape before display.
#[derive(Debug, Clone)]
pub struct UserAgent(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserAgent
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ua = parts
            .headers
            .get(header::USER_AGENT)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();

        Ok(UserAgent(ua))
    }
}
