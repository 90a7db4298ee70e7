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

use axum::{routing::get, Router};
use axum_regex_block::{regex_block_middleware, OnBlocked, RegexBlock, RegexBlockConfig};
use std::net::SocketAddr;

#[derive(Clone)]
struct PrintOnBlocked;

#[async_trait::async_trait]
impl OnBlocked for PrintOnBlocked {
    async fn on_blocked(&self, ip: &str, path: &str, pattern: &str) {
        println!("Blocked {} after request for {} (pattern {})", ip, path, pattern);
    }
}

async fn handler() -> &'static str {
    "Request successful"
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let config: RegexBlockConfig = serde_json::from_str(
        r#"{
            "regexPatterns": ["^/wp-", "\\.php$", "/\\.git/", "\\.env$"],
            "blockDurationMinutes": 10,
            "whitelist": ["10.0.0.0/8", "::1"],
            "enableDebug": true
        }"#,
    )
    .unwrap();

    let regex_block = RegexBlock::new(&config, "basic")
        .unwrap()
        .with_on_blocked(PrintOnBlocked);

    let app = Router::new()
        .route("/", get(handler))
        .layer(axum::middleware::from_fn_with_state(
            regex_block,
            regex_block_middleware,
        ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .unwrap();

    println!("Server running on http://127.0.0.1:3000");
    println!("Try http://127.0.0.1:3000/wp-login.php, then http://127.0.0.1:3000/");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
