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

use crate::logging::PluginLog;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::Duration;

/// Outcome of [`BlockTable::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockState<T> {
    /// The IP is inside its block window; detection was not run.
    AlreadyBlocked,
    /// Detection fired and the IP's block window now starts at `now`.
    NewlyBlocked(T),
    Clear,
}

/// Client IP to block start time, with lazy expiry.
///
/// Records are only removed when the same IP is observed again after its
/// window has passed. The map is sharded by key hash; every operation on an
/// IP holds that IP's shard lock for its full duration, so check, expire and
/// block are atomic per IP.
pub struct BlockTable {
    records: DashMap<String, DateTime<Utc>>,
    block_duration: TimeDelta,
    log: PluginLog,
}

impl BlockTable {
    pub fn new(block_duration: Duration, log: PluginLog) -> Self {
        let block_duration = TimeDelta::from_std(block_duration).unwrap_or(TimeDelta::MAX);
        Self {
            records: DashMap::new(),
            block_duration,
            log,
        }
    }

    pub fn block_duration(&self) -> TimeDelta {
        self.block_duration
    }

    fn within_window(&self, blocked_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(blocked_at) < self.block_duration
    }

    /// Runs the whole blocked-check / detect / block sequence for `ip` while
    /// holding its lock. `detect` is only called when the IP is not inside a
    /// block window; returning `Some` blocks the IP from `now`.
    pub fn evaluate<T, F>(&self, ip: &str, now: DateTime<Utc>, detect: F) -> BlockState<T>
    where
        F: FnOnce() -> Option<T>,
    {
        match self.records.entry(ip.to_string()) {
            Entry::Occupied(mut occupied) => {
                if self.within_window(*occupied.get(), now) {
                    if self.log.debug_enabled() {
                        tracing::debug!(parent: self.log.span(), ip = %ip, "IP is still blocked");
                    }
                    return BlockState::AlreadyBlocked;
                }

                if self.log.debug_enabled() {
                    tracing::debug!(parent: self.log.span(), ip = %ip, "Removing block for IP");
                }
                match detect() {
                    Some(detection) => {
                        occupied.insert(now);
                        BlockState::NewlyBlocked(detection)
                    }
                    None => {
                        occupied.remove();
                        BlockState::Clear
                    }
                }
            }
            Entry::Vacant(vacant) => match detect() {
                Some(detection) => {
                    vacant.insert(now);
                    BlockState::NewlyBlocked(detection)
                }
                None => BlockState::Clear,
            },
        }
    }

    /// Whether `ip` is inside its block window. A stale record is removed.
    pub fn is_blocked(&self, ip: &str, now: DateTime<Utc>) -> bool {
        matches!(self.evaluate(ip, now, || None::<()>), BlockState::AlreadyBlocked)
    }

    /// Starts (or restarts) the block window for `ip` at `now`.
    pub fn block(&self, ip: &str, now: DateTime<Utc>) {
        self.records.insert(ip.to_string(), now);
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.records.contains_key(ip)
    }

    pub fn blocked_at(&self, ip: &str) -> Option<DateTime<Utc>> {
        self.records.get(ip).map(|entry| *entry.value())
    }

    /// Returns (tracked records, records still inside their window).
    pub fn stats(&self, now: DateTime<Utc>) -> (usize, usize) {
        let total_size = self.records.len();
        let blocked_count = self
            .records
            .iter()
            .filter(|entry| self.within_window(*entry.value(), now))
            .count();

        (total_size, blocked_count)
    }
}
