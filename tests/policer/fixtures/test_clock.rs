// tests/policer/fixtures/test_clock.rs

// dependencies
use mac_policer::{Clock, ClockError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

// Test clock implementation
#[derive(Debug, Clone)]
pub struct TestClock {
    time: Arc<AtomicU32>, // Store as millis
    should_fail: Arc<AtomicBool>,
}

impl TestClock {
    pub fn new(initial_ms: u32) -> Self {
        Self {
            time: Arc::new(AtomicU32::new(initial_ms)),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn advance(&self, ms: u32) {
        // fetch_add wraps, same as a real u32 millisecond counter
        self.time.fetch_add(ms, Ordering::Relaxed);
    }

    // Make the next call to `now_ms()` return an error
    pub fn fail_next_call(&self) {
        self.should_fail.store(true, Ordering::Relaxed);
    }
}

impl Clock for TestClock {
    fn now_ms(&self) -> Result<u32, ClockError> {
        if self.should_fail.swap(false, Ordering::Relaxed) {
            Err(ClockError::SystemTimeError)
        } else {
            Ok(self.time.load(Ordering::Relaxed))
        }
    }
}
