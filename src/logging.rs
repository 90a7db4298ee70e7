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

use tracing::Span;

/// Identity attached to every event emitted by this middleware.
pub const PLUGIN_ID: &str = "axum-regex-block";

/// Logging handle owned by a single middleware instance.
///
/// Events are emitted with `parent: log.span()` so subscribers see the plugin
/// identity and instance name on each line. The span is created at error
/// level so it stays enabled under any filter that lets our errors through.
/// Debug events are additionally gated on the instance's `enable_debug`
/// setting, so two instances with different settings never affect each other.
#[derive(Debug, Clone)]
pub struct PluginLog {
    span: Span,
    debug: bool,
}

impl PluginLog {
    pub fn new(name: &str, debug: bool) -> Self {
        let span = tracing::error_span!("regex_block", plugin = PLUGIN_ID, instance = %name);
        Self { span, debug }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }
}
