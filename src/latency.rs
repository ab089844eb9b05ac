//! Latency simulation.
//!
//! Converts a configured (average, delta) pair into a per-request delay.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simulated latency for a mocked route.
///
/// The delay for one request is `average` plus a uniform random jitter in
/// milliseconds drawn from the half-open range `[0, delta)`. A `delta` of
/// zero or less means no jitter: the delay is exactly `average`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Latency {
    /// Base delay in milliseconds.
    #[serde(default, alias = "Average")]
    pub average: i64,

    /// Exclusive upper bound of additional random jitter, in milliseconds.
    #[serde(default)]
    pub delta: i64,
}

impl Latency {
    /// Calculate the delay to apply to a single request.
    ///
    /// Jitter is sampled fresh on every call. The per-thread generator is
    /// safe for concurrent draws from multiple request handlers.
    pub fn duration(&self) -> Duration {
        let jitter = if self.delta > 0 {
            rand::thread_rng().gen_range(0..self.delta)
        } else {
            0
        };
        Duration::from_millis((self.average + jitter).max(0) as u64)
    }
}
