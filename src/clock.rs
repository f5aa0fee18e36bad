// src/clock.rs

// clock module definition and implementations

// dependencies
use std::time::Instant;

use thiserror::Error;

/// Clock trait to abstract time retrieval.
///
/// Policers refill once per millisecond, so `now_ms` returns a millisecond
/// counter as a `u32`. The counter is allowed to wrap; elapsed time is always
/// computed with wrapping subtraction. Implementors must be thread-safe and
/// must be monotonic within each context that reads them.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> Result<u32, ClockError>;
}

/// Clock error type
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("system time unavailable")]
    SystemTimeError,
}

/// Monotonic millisecond clock measured from the moment it was created.
/// Truncates to `u32`, so it wraps roughly every 49.7 days.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Result<u32, ClockError> {
        Ok(self.origin.elapsed().as_millis() as u32)
    }
}
