// src/stats.rs

// packet counters kept by the engine

// dependencies
use crate::policer::Verdict;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running admit/drop counters. Relaxed increments; totals are eventually
/// consistent across workers.
#[derive(Debug, Default)]
pub(crate) struct PolicerStats {
    admitted: AtomicU64,
    dropped: AtomicU64,
}

impl PolicerStats {
    pub(crate) fn record(&self, verdict: Verdict) {
        let counter = match verdict {
            Verdict::Admit => &self.admitted,
            Verdict::Drop => &self.dropped,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PolicerStatsSnapshot {
        PolicerStatsSnapshot {
            admitted: self.admitted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the engine's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolicerStatsSnapshot {
    /// Packets classified while enabled and admitted
    pub admitted: u64,
    /// Packets classified while enabled and dropped
    pub dropped: u64,
}

impl PolicerStatsSnapshot {
    pub fn total(&self) -> u64 {
        self.admitted + self.dropped
    }

    /// Fraction of classified packets that were dropped, 0.0 when idle.
    pub fn drop_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.dropped as f64 / total as f64,
        }
    }
}
