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

pub mod classifier;
pub mod client_ip;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod patterns;
pub mod table;
pub mod types;
pub mod whitelist;

#[cfg(feature = "metrics")]
pub mod routes;

pub use classifier::RegexBlock;
pub use client_ip::extract_client_ip;
pub use config::RegexBlockConfig;
pub use error::RegexBlockError;
pub use logging::{PluginLog, PLUGIN_ID};
pub use middleware::regex_block_middleware;
pub use patterns::{CompiledPattern, PatternSet};
pub use table::{BlockState, BlockTable};
pub use types::{NoOpOnBlocked, OnBlocked, Verdict};
pub use whitelist::WhitelistSet;

#[cfg(feature = "metrics")]
pub use routes::metrics_handler;
