// src/utils.rs

// small helpers shared by the policer internals

/// Pads a value out to its own cache line so per-context slots written by
/// different workers never share a line.
#[cfg_attr(target_arch = "aarch64", repr(C, align(128)))]
#[cfg_attr(not(target_arch = "aarch64"), repr(C, align(64)))]
#[derive(Debug, Default)]
pub(crate) struct CacheAligned<T>(pub T);

impl<T> CacheAligned<T> {
    pub(crate) const fn new(value: T) -> Self {
        Self(value)
    }

    #[inline(always)]
    pub(crate) fn get(&self) -> &T {
        &self.0
    }
}

/// `value << shift`, pinned to `u64::MAX` instead of losing high bits.
#[inline]
pub(crate) fn saturating_shl(value: u64, shift: u32) -> u64 {
    if shift >= u64::BITS {
        return if value == 0 { 0 } else { u64::MAX };
    }
    if value > (u64::MAX >> shift) {
        u64::MAX
    } else {
        value << shift
    }
}
