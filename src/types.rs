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

use axum::http::StatusCode;

/// Decision for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Client IP is whitelisted; no other check ran.
    Whitelisted,
    /// Not blocked and no pattern matched.
    Allowed,
    /// IP is inside an earlier block window.
    StillBlocked,
    /// Path matched `pattern`; the IP's block window starts now.
    NewlyBlocked { pattern: String },
    /// Path matched `pattern` but the client IP is unknown, so nothing was
    /// recorded.
    Rejected { pattern: String },
}

impl Verdict {
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Verdict::Whitelisted | Verdict::Allowed)
    }

    /// Status for a denied request. First detection answers 404 so the client
    /// is not told it tripped a rule; repeats inside the window get 403.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Verdict::Whitelisted | Verdict::Allowed => None,
            Verdict::StillBlocked => Some(StatusCode::FORBIDDEN),
            Verdict::NewlyBlocked { .. } | Verdict::Rejected { .. } => {
                Some(StatusCode::NOT_FOUND)
            }
        }
    }
}

#[async_trait::async_trait]
pub trait OnBlocked: Send + Sync {
    /// Called once each time `ip` enters a fresh block window.
    async fn on_blocked(&self, ip: &str, path: &str, pattern: &str);
}

pub struct NoOpOnBlocked;

#[async_trait::async_trait]
impl OnBlocked for NoOpOnBlocked {
    async fn on_blocked(&self, _ip: &str, _path: &str, _pattern: &str) {}
}
