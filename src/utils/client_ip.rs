//! Client identity for rate limiting.

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};
use std::net::SocketAddr;

/// Identity used when nothing better is known.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Resolves the client address of a request.
///
/// When `behind_proxy` is set the first `X-Forwarded-For` hop wins, then
/// `X-Real-IP`. Otherwise forwarding headers are ignored, since any client
/// could forge them, and the socket peer is used.
pub fn client_ip<B>(request: &Request<B>, behind_proxy: bool) -> String {
    if behind_proxy
        && let Some(ip) = forwarded_ip(request.headers())
    {
        return ip;
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let first_hop = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    };

    first_hop.or_else(real_ip).map(str::to_string)
}
