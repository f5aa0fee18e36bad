// src/policer.rs

// per-MAC token bucket state and the per-packet admission test

// dependencies
use crate::errors::PolicerError;
use crate::mac::MacAddr;
use crate::scaling::RateScale;
use crate::utils::{CacheAligned, saturating_shl};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Which side of a MAC's traffic a packet belongs to.
/// Each side has its own bucket with the same capacity and refill rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The policed MAC is the packet's source.
    Source = 0,
    /// The policed MAC is the packet's destination.
    Destination = 1,
}

impl Direction {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of policing a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Admit,
    Drop,
}

impl Verdict {
    pub fn is_admit(self) -> bool {
        self == Verdict::Admit
    }
}

/// Rate limiting state for a single MAC address.
///
/// The rate group (`scale`, `bucket_capacity`, `tokens_per_period`) is only
/// replaced by [`Policer::reconfigure`], under a write lock. Buckets and the
/// per-context timestamps are atomics shared by every worker; each bucket
/// update is a single read-modify-write, so concurrent contexts never lose
/// each other's credits or debits. A context only ever touches its own
/// timestamp slot.
#[derive(Debug)]
pub struct Policer {
    mac: MacAddr,
    rate: RwLock<RateScale>,
    buckets: [AtomicU64; 2],
    last_update_ms: Box<[CacheAligned<AtomicU32>]>,
}

impl Policer {
    /// Create a policer with empty buckets and every context's last refill at 0.
    pub(crate) fn new(mac: MacAddr, rate: RateScale, contexts: usize) -> Self {
        Self {
            mac,
            rate: RwLock::new(rate),
            buckets: [AtomicU64::new(0), AtomicU64::new(0)],
            last_update_ms: (0..contexts)
                .map(|_| CacheAligned::new(AtomicU32::new(0)))
                .collect(),
        }
    }

    /// Swap in a new rate group; buckets and timestamps are left as they are.
    pub(crate) fn reconfigure(&self, rate: RateScale) {
        *self.rate.write() = rate;
    }

    pub fn mac(&self) -> MacAddr {
        self.mac
    }

    /// Current scaled rate parameters.
    pub fn rate(&self) -> RateScale {
        *self.rate.read()
    }

    pub fn limit_bits_per_second(&self) -> u64 {
        self.rate.read().limit_bits_per_second
    }

    pub fn scale(&self) -> u32 {
        self.rate.read().scale
    }

    pub fn bucket_capacity(&self) -> u64 {
        self.rate.read().bucket_capacity
    }

    pub fn tokens_per_period(&self) -> u64 {
        self.rate.read().tokens_per_period
    }

    /// Scaled token count currently held for `direction`.
    pub fn bucket(&self, direction: Direction) -> u64 {
        self.buckets[direction.index()].load(Ordering::Relaxed)
    }

    /// Time of the last refill seen by `context`, if the context exists.
    pub fn last_update_ms(&self, context: usize) -> Option<u32> {
        self.last_update_ms
            .get(context)
            .map(|slot| slot.get().load(Ordering::Relaxed))
    }

    /// Number of per-context timestamp slots.
    pub fn contexts(&self) -> usize {
        self.last_update_ms.len()
    }

    /// Refill both buckets for the time elapsed since `context` last looked at
    /// this policer, then try to take `packet_length_bits` (scaled) from the
    /// bucket for `direction`.
    ///
    /// Elapsed time is a wrapping `u32` difference. A clock that runs
    /// backwards within one context credits a huge amount, which the capacity
    /// clamp then bounds to a full bucket.
    pub fn test(
        &self,
        direction: Direction,
        packet_length_bits: u64,
        now_ms: u32,
        context: usize,
    ) -> Result<Verdict, PolicerError> {
        let slot = self
            .last_update_ms
            .get(context)
            .ok_or(PolicerError::ContextOutOfRange {
                context,
                contexts: self.contexts(),
            })?;
        let rate = self.rate();

        let scaled_length = saturating_shl(packet_length_bits, rate.scale);
        let elapsed_periods = now_ms.wrapping_sub(slot.get().swap(now_ms, Ordering::Relaxed));
        let credit = (elapsed_periods as u64).saturating_mul(rate.tokens_per_period);
        let refill = |tokens: u64| tokens.saturating_add(credit).min(rate.bucket_capacity);

        let other = &self.buckets[1 - direction.index()];
        let _ = other.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |tokens| {
            Some(refill(tokens))
        });

        let own = &self.buckets[direction.index()];
        let previous = own
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |tokens| {
                let available = refill(tokens);
                if available >= scaled_length {
                    Some(available - scaled_length)
                } else {
                    Some(available)
                }
            })
            .unwrap_or_else(|tokens| tokens);

        if refill(previous) >= scaled_length {
            Ok(Verdict::Admit)
        } else {
            Ok(Verdict::Drop)
        }
    }
}
