// src/lib.rs

//! # MAC Policer
//!
//! Per-MAC-address traffic policing with token buckets. Every configured
//! address gets its own policer with two buckets, one for traffic it sends and
//! one for traffic it receives. Rates are kept in fixed point so the per-packet
//! path is integer-only.
//!
//! ## Quick Example
//!
//! ```rust
//! use mac_policer::{MacAddr, PolicerConfig, PolicerEngine, SystemClock, Verdict};
//!
//! let engine = PolicerEngine::with_config(PolicerConfig::new(1), SystemClock::new()).unwrap();
//! let host: MacAddr = "b4:de:31:13:cd:eb".parse().unwrap();
//! engine.upsert(host, 100_000);
//!
//! // buckets start empty, so nothing gets through before time has passed
//! let verdict = engine.classify(host, MacAddr::new(0), 8_000, 0, 0).unwrap();
//! assert_eq!(verdict, Verdict::Drop);
//!
//! // one second later the bucket holds a full second's allowance
//! let verdict = engine.classify(host, MacAddr::new(0), 8_000, 1_000, 0).unwrap();
//! assert_eq!(verdict, Verdict::Admit);
//! ```

// private modules
mod clock;
mod config;
mod engine;
mod errors;
mod mac;
mod policer;
mod scaling;
mod stats;
mod store;
mod utils;

// public API exports
pub use clock::{Clock, ClockError, SystemClock};
pub use config::PolicerConfig;
pub use engine::PolicerEngine;
pub use errors::PolicerError;
pub use mac::MacAddr;
pub use policer::{Direction, Policer, Verdict};
pub use scaling::{PERIODS_PER_SECOND, RateScale};
pub use stats::PolicerStatsSnapshot;
pub use store::PolicerStore;
