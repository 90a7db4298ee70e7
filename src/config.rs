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

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BLOCK_DURATION_MINUTES: u64 = 60;

/// Settings consumed once when a [`RegexBlock`](crate::RegexBlock) is built.
///
/// Deserializes from the camelCase shape hosts typically keep in their
/// route configuration:
///
/// ```json
/// { "regexPatterns": ["^/wp-admin"], "blockDurationMinutes": 30,
///   "whitelist": ["10.0.0.0/8"], "enableDebug": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegexBlockConfig {
    pub regex_patterns: Vec<String>,
    pub block_duration_minutes: u64,
    /// CIDR networks or bare IP addresses exempt from blocking
    pub whitelist: Vec<String>,
    pub enable_debug: bool,
}

impl Default for RegexBlockConfig {
    fn default() -> Self {
        Self {
            regex_patterns: Vec::new(),
            block_duration_minutes: DEFAULT_BLOCK_DURATION_MINUTES,
            whitelist: Vec::new(),
            enable_debug: false,
        }
    }
}

impl RegexBlockConfig {
    pub fn new(regex_patterns: Vec<String>) -> Self {
        Self {
            regex_patterns,
            ..Default::default()
        }
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.regex_patterns.push(pattern.to_string());
        self
    }

    pub fn with_block_duration_minutes(mut self, minutes: u64) -> Self {
        self.block_duration_minutes = minutes;
        self
    }

    pub fn with_whitelist_entry(mut self, entry: &str) -> Self {
        self.whitelist.push(entry.to_string());
        self
    }

    pub fn with_whitelist(mut self, entries: Vec<String>) -> Self {
        self.whitelist.extend(entries);
        self
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.enable_debug = enabled;
        self
    }

    pub fn block_duration(&self) -> Duration {
        Duration::from_secs(self.block_duration_minutes.saturating_mul(60))
    }
}
