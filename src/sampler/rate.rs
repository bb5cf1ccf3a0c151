use std::time::Duration;

use crate::system::source::NetCounters;

/// Network throughput over one tick, in KiB per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RateSample {
    pub upload_kbps: f64,
    pub download_kbps: f64,
}

impl RateSample {
    /// Rate between two cumulative counter reads.
    ///
    /// A counter that went backwards (interface reset, wrap) yields 0 rather
    /// than a negative rate. A zero `elapsed` is treated as one second.
    pub fn between(prev: NetCounters, now: NetCounters, elapsed: Duration) -> Self {
        let secs = if elapsed.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64()
        };
        Self {
            upload_kbps: kib_per_sec(prev.bytes_sent, now.bytes_sent, secs),
            download_kbps: kib_per_sec(prev.bytes_recv, now.bytes_recv, secs),
        }
    }
}

fn kib_per_sec(prev: u64, now: u64, secs: f64) -> f64 {
    now.saturating_sub(prev) as f64 / 1024.0 / secs
}
