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

use crate::{
    classifier::RegexBlock,
    client_ip::{extract_client_ip, remote_addr},
    types::{OnBlocked, Verdict},
};
use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
#[cfg(feature = "metrics")]
use std::time::Instant;

/// Install with `axum::middleware::from_fn_with_state(regex_block, regex_block_middleware)`.
/// Serve the app with `into_make_service_with_connect_info::<SocketAddr>()` so
/// the client address is available.
pub async fn regex_block_middleware<B: OnBlocked + 'static>(
    State(regex_block): State<RegexBlock<B>>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    #[cfg(feature = "metrics")]
    let start = Instant::now();

    let ip = extract_client_ip(&remote_addr(&request));
    let path = request.uri().path().to_string();

    let verdict = regex_block.classify(&ip, &path, Utc::now());

    match &verdict {
        Verdict::NewlyBlocked { pattern } => {
            crate::metrics::record_block(regex_block.name(), pattern);

            // Don't hold up the response on the callback
            let on_blocked = regex_block.on_blocked();
            let pattern = pattern.clone();
            let ip = ip.clone();
            let path = path.clone();
            tokio::spawn(async move {
                on_blocked.on_blocked(&ip, &path, &pattern).await;
            });
        }
        // Unattributable rejections are never recorded, so they are not blocks
        _ => {}
    }

    if let Some(status) = verdict.status() {
        #[cfg(feature = "metrics")]
        {
            let duration = start.elapsed().as_secs_f64();
            crate::metrics::record_http_request(status.as_u16(), duration);
        }
        return status.into_response();
    }

    let response = next.run(request).await;

    #[cfg(feature = "metrics")]
    {
        let duration = start.elapsed().as_secs_f64();
        crate::metrics::record_http_request(response.status().as_u16(), duration);
    }

    response
}
