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

use crate::error::RegexBlockError;
use crate::logging::PluginLog;
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::net::IpAddr;

/// Networks exempt from all blocking. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct WhitelistSet {
    networks: Vec<IpNet>,
    rejected: Vec<String>,
}

impl WhitelistSet {
    pub fn new<S: AsRef<str>>(entries: &[S], log: &PluginLog) -> Self {
        let mut networks = Vec::with_capacity(entries.len());
        let mut rejected = Vec::new();

        for entry in entries {
            let entry = entry.as_ref();
            match parse_entry(entry) {
                Some(net) => {
                    if log.debug_enabled() {
                        tracing::debug!(
                            parent: log.span(),
                            entry = %entry,
                            network = %net,
                            "Adding whitelist entry"
                        );
                    }
                    networks.push(net);
                }
                None => {
                    let err = RegexBlockError::InvalidWhitelistEntry {
                        entry: entry.to_string(),
                    };
                    tracing::error!(parent: log.span(), entry = %entry, "{}", err);
                    rejected.push(entry.to_string());
                }
            }
        }

        Self { networks, rejected }
    }

    /// Unparsable addresses are never whitelisted. IPv4-mapped IPv6 addresses
    /// are matched against IPv4 networks.
    pub fn contains(&self, ip: &str) -> bool {
        match ip.parse::<IpAddr>() {
            Ok(addr) => {
                let addr = addr.to_canonical();
                self.networks.iter().any(|net| net.contains(&addr))
            }
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

/// CIDR first, then a bare address as a single-host network.
fn parse_entry(entry: &str) -> Option<IpNet> {
    let entry = entry.trim();
    if let Ok(net) = entry.parse::<IpNet>() {
        return Some(net);
    }

    match entry.parse::<IpAddr>().ok()? {
        IpAddr::V4(v4) => Ipv4Net::new(v4, 32).ok().map(IpNet::V4),
        IpAddr::V6(v6) => Ipv6Net::new(v6, 128).ok().map(IpNet::V6),
    }
}
