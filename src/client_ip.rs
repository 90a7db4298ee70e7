/*  This file is part of axum-regex-block
 *  Copyright (C) 2025  Grant DeFayette
 *
 *  axum-regex-block is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU Lesser General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  axum-regex-block is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU Lesser General Public License for more details.
 *
 *  You should have received a copy of the GNU Lesser General Public License
 *  along with axum-regex-block.  If not, see <https://www.gnu.org/licenses/>.
 */

use axum::{extract::ConnectInfo, http::Request};
use std::net::SocketAddr;

/// Remote address of the connection as `host:port`, or an empty string when
/// the app was not served with connect info.
pub fn remote_addr<B>(request: &Request<B>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default()
}

/// Strips the port from a `host:port` remote address. Anything that does not
/// parse yields an empty string, which is never whitelisted and never
/// accumulates block history.
pub fn extract_client_ip(remote_addr: &str) -> String {
    remote_addr
        .parse::<SocketAddr>()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_ipv4_port_stripped() {
        assert_eq!(extract_client_ip("192.168.1.10:54321"), "192.168.1.10");
    }

    #[test]
    fn test_ipv6_port_stripped() {
        assert_eq!(extract_client_ip("[2001:db8::1]:443"), "2001:db8::1");
        assert_eq!(extract_client_ip("[::1]:8080"), "::1");
    }

    #[test]
    fn test_unparsable_yields_empty() {
        assert_eq!(extract_client_ip(""), "");
        assert_eq!(extract_client_ip("192.168.1.10"), "");
        assert_eq!(extract_client_ip("not an address"), "");
    }

    #[test]
    fn test_remote_addr_from_connect_info() {
        let mut request = Request::new(Body::empty());
        assert_eq!(remote_addr(&request), "");

        let addr: SocketAddr = "10.1.2.3:4000".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(remote_addr(&request), "10.1.2.3:4000");
    }
}
