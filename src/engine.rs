// src/engine.rs

// mac-policer: per-packet classification against the policer table.

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::PolicerConfig;
use crate::errors::PolicerError;
use crate::mac::MacAddr;
use crate::policer::{Direction, Verdict};
use crate::stats::{PolicerStats, PolicerStatsSnapshot};
use crate::store::PolicerStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, trace};

/// Length of an Ethernet header: destination MAC, source MAC, EtherType.
const ETHERNET_HEADER_LEN: usize = 14;

/// The main policing engine.
/// C is the clock type, defaulting to SystemClock.
/// The store sits behind an `Arc` so control-plane code can keep upserting
/// while workers classify.
#[derive(Debug)]
pub struct PolicerEngine<C = SystemClock>
where
    C: Clock,
{
    store: Arc<PolicerStore>,
    enabled: AtomicBool,
    stats: PolicerStats,
    clock: C,
}

impl<C> PolicerEngine<C>
where
    C: Clock,
{
    // method to create a new engine from a config object
    pub fn with_config(config: PolicerConfig, clock: C) -> Result<Self, PolicerError> {
        let store = PolicerStore::with_config(&config)?;
        Ok(Self::with_store(Arc::new(store), config.enabled, clock))
    }

    // method to create an engine over an existing, possibly shared, store
    pub fn with_store(store: Arc<PolicerStore>, enabled: bool, clock: C) -> Self {
        Self {
            store,
            enabled: AtomicBool::new(enabled),
            stats: PolicerStats::default(),
            clock,
        }
    }

    pub fn store(&self) -> &Arc<PolicerStore> {
        &self.store
    }

    /// Create or reconfigure the policer for `mac`. See [`PolicerStore::upsert`].
    pub fn upsert(&self, mac: MacAddr, limit_bits_per_second: u64) {
        self.store.upsert(mac, limit_bits_per_second);
    }

    /// Attach or detach policing. While disabled every packet is admitted and
    /// no policer state changes.
    pub fn set_enabled(&self, enabled: bool) {
        let was = self.enabled.swap(enabled, Ordering::Relaxed);
        if was != enabled {
            info!(enabled, "mac policing toggled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Police one packet.
    ///
    /// The source MAC's policer is tested on its source bucket first; a drop
    /// there ends classification. Otherwise the destination MAC's policer is
    /// tested on its destination bucket. Addresses without a policer are not
    /// policed.
    pub fn classify(
        &self,
        src: MacAddr,
        dst: MacAddr,
        packet_length_bits: u64,
        now_ms: u32,
        context: usize,
    ) -> Result<Verdict, PolicerError> {
        let contexts = self.store.contexts();
        if context >= contexts {
            return Err(PolicerError::ContextOutOfRange { context, contexts });
        }
        if !self.is_enabled() {
            return Ok(Verdict::Admit);
        }

        let verdict = self.police(src, dst, packet_length_bits, now_ms, context)?;
        self.stats.record(verdict);
        Ok(verdict)
    }

    fn police(
        &self,
        src: MacAddr,
        dst: MacAddr,
        packet_length_bits: u64,
        now_ms: u32,
        context: usize,
    ) -> Result<Verdict, PolicerError> {
        if let Some(policer) = self.store.find(src) {
            if policer.test(Direction::Source, packet_length_bits, now_ms, context)?
                == Verdict::Drop
            {
                trace!(%src, %dst, packet_length_bits, "dropped by source policer");
                return Ok(Verdict::Drop);
            }
        }

        if let Some(policer) = self.store.find(dst) {
            let verdict =
                policer.test(Direction::Destination, packet_length_bits, now_ms, context)?;
            if verdict == Verdict::Drop {
                trace!(%src, %dst, packet_length_bits, "dropped by destination policer");
            }
            return Ok(verdict);
        }

        Ok(Verdict::Admit)
    }

    /// Police one packet at the engine clock's current time.
    pub fn classify_now(
        &self,
        src: MacAddr,
        dst: MacAddr,
        packet_length_bits: u64,
        context: usize,
    ) -> Result<Verdict, PolicerError> {
        let now_ms = self.clock.now_ms()?;
        self.classify(src, dst, packet_length_bits, now_ms, context)
    }

    /// Police a raw Ethernet frame. Addresses come from the header and the
    /// whole frame length counts against the buckets.
    pub fn classify_frame(
        &self,
        frame: &[u8],
        now_ms: u32,
        context: usize,
    ) -> Result<Verdict, PolicerError> {
        let too_short = || PolicerError::FrameTooShort { len: frame.len() };
        if frame.len() < ETHERNET_HEADER_LEN {
            return Err(too_short());
        }
        let dst = MacAddr::from_slice(&frame[0..6]).ok_or_else(too_short)?;
        let src = MacAddr::from_slice(&frame[6..12]).ok_or_else(too_short)?;
        let length_bits = (frame.len() as u64).saturating_mul(8);

        self.classify(src, dst, length_bits, now_ms, context)
    }

    /// Admit/drop counts observed while enabled.
    pub fn stats(&self) -> PolicerStatsSnapshot {
        self.stats.snapshot()
    }
}
