//! Time sources for the generator and renderer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::event::Millis;

pub trait Clock: Send + Sync {
    /// Milliseconds since the clock's origin.
    fn now_ms(&self) -> Millis;
}

/// Wall-clock time measured from construction.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic clock that only moves when told to. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    // Microseconds, so sub-millisecond frame times survive the integer store.
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: Millis) -> Self {
        Self {
            micros: Arc::new(AtomicU64::new(to_micros(start_ms))),
        }
    }

    pub fn advance(&self, ms: Millis) {
        self.micros.fetch_add(to_micros(ms), Ordering::AcqRel);
    }

    pub fn set(&self, ms: Millis) {
        self.micros.store(to_micros(ms), Ordering::Release);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.micros.load(Ordering::Acquire) as f64 / 1000.0
    }
}

fn to_micros(ms: Millis) -> u64 {
    // Saturating float-to-int cast: negatives and NaN become 0.
    (ms * 1000.0).round() as u64
}
