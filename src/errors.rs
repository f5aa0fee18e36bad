// src/errors.rs

// error handling for the policer types

// dependencies
use thiserror::Error;

use crate::clock::ClockError;

/// Error type for policer configuration and classification issues.
///
/// Rates, packet lengths and timestamps are never rejected; these variants
/// only cover inputs that cannot be mapped onto the policer state at all.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PolicerError {
    #[error("Context count must be at least one")]
    InvalidContextCount,
    #[error("Context {context} is out of range for a store with {contexts} contexts")]
    ContextOutOfRange { context: usize, contexts: usize },
    #[error("Invalid MAC address: {0:?}")]
    InvalidMacAddr(String),
    #[error("Frame of {len} bytes is shorter than an Ethernet header")]
    FrameTooShort { len: usize },
    #[error("Clock error occurred")]
    ClockError(#[from] ClockError),
}
