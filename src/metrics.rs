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

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;
#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_gauge_vec, register_histogram_vec, CounterVec, GaugeVec,
    HistogramVec,
};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref REGEX_BLOCK_BLOCKS: CounterVec = register_counter_vec!(
        "regex_block_blocks_total",
        "Total number of IPs freshly blocked, by instance and pattern",
        &["instance", "pattern"]
    )
    .unwrap();
    pub static ref REGEX_BLOCK_TRACKED_IPS: GaugeVec = register_gauge_vec!(
        "regex_block_tracked_ips",
        "Current number of IPs with a block record, including stale ones",
        &["instance"]
    )
    .unwrap();
    pub static ref REGEX_BLOCK_BLOCKED_IPS: GaugeVec = register_gauge_vec!(
        "regex_block_blocked_ips",
        "Current number of blocked IPs",
        &["instance"]
    )
    .unwrap();
    pub static ref HTTP_REQUESTS: CounterVec = register_counter_vec!(
        "http_requests_total",
        "Total HTTP requests by status code",
        &["status"]
    )
    .unwrap();
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["status"]
    )
    .unwrap();
}

#[cfg(feature = "metrics")]
pub fn record_block(instance: &str, pattern: &str) {
    REGEX_BLOCK_BLOCKS
        .with_label_values(&[instance, pattern])
        .inc();
}

#[cfg(feature = "metrics")]
pub fn update_tracked_ips(instance: &str, count: usize) {
    REGEX_BLOCK_TRACKED_IPS
        .with_label_values(&[instance])
        .set(count as f64);
}

#[cfg(feature = "metrics")]
pub fn update_blocked_ips(instance: &str, count: usize) {
    REGEX_BLOCK_BLOCKED_IPS
        .with_label_values(&[instance])
        .set(count as f64);
}

#[cfg(feature = "metrics")]
pub fn record_http_request(status: u16, duration_seconds: f64) {
    HTTP_REQUESTS
        .with_label_values(&[&status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[&status.to_string()])
        .observe(duration_seconds);
}

// No-op versions when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_block(_instance: &str, _pattern: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn update_tracked_ips(_instance: &str, _count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn update_blocked_ips(_instance: &str, _count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_http_request(_status: u16, _duration_seconds: f64) {}
