/*!
 * Elapsed-time sources for playback.
 *
 * A session captures its baseline once and measures everything as time
 * elapsed since then. `MonotonicClock` is backed by `std::time::Instant`;
 * `VirtualClock` advances only when asked to sleep and records each sleep,
 * so schedules can be checked exactly without waiting.
 */

use std::time::{Duration, Instant};
use async_trait::async_trait;

/// Monotonic time measured from a session baseline
#[async_trait]
pub trait Clock: Send {
    /// Time elapsed since the baseline
    fn elapsed(&self) -> Duration;

    /// Suspend for `duration`
    async fn sleep(&mut self, duration: Duration);

    /// Time elapsed since the baseline, in seconds
    fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

/// Convert seconds to a `Duration`, treating negative or invalid values as zero
pub fn duration_from_secs(seconds: f64) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

/// Real clock; the baseline is captured on construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    baseline: Instant,
}

impl MonotonicClock {
    /// Capture the baseline now
    pub fn start() -> Self {
        Self {
            baseline: Instant::now(),
        }
    }
}

#[async_trait]
impl Clock for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.baseline.elapsed()
    }

    async fn sleep(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Simulated clock that never blocks
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Duration,
    sleeps: Vec<Duration>,
}

impl VirtualClock {
    /// Clock at its baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that reports `elapsed` before any sleep, as if the session
    /// started late
    pub fn starting_at(elapsed: Duration) -> Self {
        Self {
            now: elapsed,
            sleeps: Vec::new(),
        }
    }

    /// Move time forward without recording a sleep
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }

    /// Every sleep requested so far, in order
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }

    /// Sum of all requested sleeps
    pub fn total_slept(&self) -> Duration {
        self.sleeps.iter().sum()
    }
}

#[async_trait]
impl Clock for VirtualClock {
    fn elapsed(&self) -> Duration {
        self.now
    }

    async fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        self.now += duration;
    }
}
