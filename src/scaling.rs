// src/scaling.rs

//! Fixed-point representation of a configured bit rate.
//!
//! The hot path only does integer arithmetic, so a rate in bits per second is
//! turned into a per-millisecond credit scaled up by a power of two. Low rates,
//! whose per-millisecond byte credit is a small fraction, get a large shift and
//! keep their precision; high rates get a small shift so the scaled bucket
//! ceiling still fits in 32 bits.

/// Refill periods per second. Tokens are credited once per elapsed millisecond.
pub const PERIODS_PER_SECOND: u64 = 1_000;

/// Extra headroom, in bits, reserved for the per-period credit when picking
/// the shift. Biases low rates toward more fractional bits.
const MAX_RATE_SHIFT: u32 = 10;

/// Scaled parameters derived from a configured rate.
///
/// `bucket_capacity` and `tokens_per_period` are both expressed in bytes
/// multiplied by `1 << scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateScale {
    pub limit_bits_per_second: u64,
    pub scale: u32,
    pub bucket_capacity: u64,
    pub tokens_per_period: u64,
}

impl RateScale {
    /// Derive the scaled parameters for `limit_bits_per_second`.
    ///
    /// The rate is truncated to whole bytes per second first, so anything
    /// below 8 bits/s yields a zero-capacity bucket.
    pub fn from_bits_per_second(limit_bits_per_second: u64) -> Self {
        let limit_bytes = limit_bits_per_second >> 3;
        let ideal_tokens_per_period = limit_bytes as f64 / PERIODS_PER_SECOND as f64;

        let max_value = limit_bytes.max((ideal_tokens_per_period as u64) << MAX_RATE_SHIFT);
        // Shift is measured against a 32-bit ceiling; rates beyond that get no shift.
        let scale = u32::try_from(max_value)
            .map(u32::leading_zeros)
            .unwrap_or(0);

        let bucket_capacity = limit_bytes << scale;
        let tokens_per_period =
            ((ideal_tokens_per_period * (1u64 << scale) as f64) as u64).max(1);

        Self {
            limit_bits_per_second,
            scale,
            bucket_capacity,
            tokens_per_period,
        }
    }
}
