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

use crate::config::RegexBlockConfig;
use crate::error::Result;
use crate::logging::PluginLog;
use crate::patterns::PatternSet;
use crate::table::{BlockState, BlockTable};
use crate::types::{NoOpOnBlocked, OnBlocked, Verdict};
use crate::whitelist::WhitelistSet;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Request classifier shared by every request routed through one middleware
/// instance. Cloning is cheap and clones share block state.
pub struct RegexBlock<B: OnBlocked = NoOpOnBlocked> {
    name: Arc<str>,
    patterns: Arc<PatternSet>,
    whitelist: Arc<WhitelistSet>,
    table: Arc<BlockTable>,
    log: PluginLog,
    on_blocked: Arc<B>,
}

impl RegexBlock<NoOpOnBlocked> {
    /// Builds an instance from `config`. Fails only when none of the
    /// configured patterns compile.
    pub fn new(config: &RegexBlockConfig, name: &str) -> Result<Self> {
        let log = PluginLog::new(name, config.enable_debug);
        tracing::info!(parent: log.span(), "RegexBlock middleware is starting");

        let patterns = PatternSet::new(config.regex_patterns.as_slice(), &log)?;

        tracing::info!(
            parent: log.span(),
            block_duration_minutes = config.block_duration_minutes,
            "Setting block duration as {} minutes",
            config.block_duration_minutes
        );
        let table = BlockTable::new(config.block_duration(), log.clone());

        let whitelist = WhitelistSet::new(config.whitelist.as_slice(), &log);

        Ok(Self {
            name: Arc::from(name),
            patterns: Arc::new(patterns),
            whitelist: Arc::new(whitelist),
            table: Arc::new(table),
            log,
            on_blocked: Arc::new(NoOpOnBlocked),
        })
    }
}

impl<B: OnBlocked + 'static> RegexBlock<B> {
    pub fn with_on_blocked<C: OnBlocked>(self, on_blocked: C) -> RegexBlock<C> {
        RegexBlock {
            name: self.name,
            patterns: self.patterns,
            whitelist: self.whitelist,
            table: self.table,
            log: self.log,
            on_blocked: Arc::new(on_blocked),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn whitelist(&self) -> &WhitelistSet {
        &self.whitelist
    }

    pub fn table(&self) -> &BlockTable {
        &self.table
    }

    pub fn log(&self) -> &PluginLog {
        &self.log
    }

    pub fn on_blocked(&self) -> Arc<B> {
        self.on_blocked.clone()
    }

    /// Classifies one request from `ip` for `path` at `now`.
    ///
    /// Whitelisted IPs return without touching the block table. Otherwise the
    /// blocked check, the pattern scan and the block itself run under the
    /// IP's table lock. An empty `ip` (no attributable client) is only
    /// checked against the patterns and never recorded.
    pub fn classify(&self, ip: &str, path: &str, now: DateTime<Utc>) -> Verdict {
        if self.log.debug_enabled() {
            tracing::debug!(parent: self.log.span(), ip = %ip, path = %path, "Testing IP");
        }

        if self.whitelist.contains(ip) {
            if self.log.debug_enabled() {
                tracing::debug!(parent: self.log.span(), ip = %ip, "IP is in whitelist");
            }
            return Verdict::Whitelisted;
        }

        if ip.is_empty() {
            if self.log.debug_enabled() {
                tracing::debug!(
                    parent: self.log.span(),
                    path = %path,
                    "Could not attribute request to a client IP"
                );
            }
            return match self.patterns.matches(path) {
                Some(pattern) => {
                    tracing::info!(
                        parent: self.log.span(),
                        path = %path,
                        pattern = %pattern,
                        "Rejecting unattributable request for path {}, based on regex of {}",
                        path,
                        pattern
                    );
                    Verdict::Rejected {
                        pattern: pattern.as_str().to_string(),
                    }
                }
                None => Verdict::Allowed,
            };
        }

        match self.table.evaluate(ip, now, || self.patterns.matches(path)) {
            BlockState::AlreadyBlocked => Verdict::StillBlocked,
            BlockState::NewlyBlocked(pattern) => {
                tracing::info!(
                    parent: self.log.span(),
                    ip = %ip,
                    path = %path,
                    pattern = %pattern,
                    "Setting block for IP {} for requested path {}, based on regex of {}",
                    ip,
                    path,
                    pattern
                );
                Verdict::NewlyBlocked {
                    pattern: pattern.as_str().to_string(),
                }
            }
            BlockState::Clear => Verdict::Allowed,
        }
    }

    #[cfg(feature = "metrics")]
    pub fn update_metrics(&self) {
        let (tracked, blocked) = self.table.stats(Utc::now());
        crate::metrics::update_tracked_ips(&self.name, tracked);
        crate::metrics::update_blocked_ips(&self.name, blocked);
    }
}

impl<B: OnBlocked> Clone for RegexBlock<B> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            patterns: self.patterns.clone(),
            whitelist: self.whitelist.clone(),
            table: self.table.clone(),
            log: self.log.clone(),
            on_blocked: self.on_blocked.clone(),
        }
    }
}
