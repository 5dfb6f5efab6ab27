//! Clock Module
//!
//! Injectable time source so expiry behavior can be tested deterministically
//! without sleeping.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Clock Trait ==
/// Source of "now" for the cache, in Unix milliseconds.
///
/// The cache reads time exclusively through this trait. Production code
/// uses [`SystemClock`]; tests substitute a [`ManualClock`] and advance it
/// explicitly to simulate the passage of time.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current time as Unix milliseconds.
    fn now_ms(&self) -> u64;
}

// == System Clock ==
/// Default clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64
    }
}

// == Manual Clock ==
/// Controllable clock for tests.
///
/// Starts at zero (or a chosen timestamp) and only moves when told to.
/// Interior mutability via an atomic lets a single instance be shared
/// between a test and the cache under test.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    /// Creates a manual clock starting at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manual clock starting at the given Unix millisecond timestamp.
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(now_ms),
        }
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute Unix millisecond timestamp.
    pub fn set_ms(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
