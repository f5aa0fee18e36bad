// src/store.rs

// table of active policers keyed by MAC address

// dependencies
use crate::config::PolicerConfig;
use crate::errors::PolicerError;
use crate::mac::MacAddr;
use crate::policer::Policer;
use crate::scaling::RateScale;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Owns every [`Policer`], one per MAC address.
///
/// Lookups go through a `DashMap`; a separate insertion-order index keeps
/// [`PolicerStore::policers`] deterministic.
#[derive(Debug)]
pub struct PolicerStore {
    policers: DashMap<MacAddr, Arc<Policer>>,
    order: Mutex<Vec<MacAddr>>,
    contexts: usize,
}

impl PolicerStore {
    /// Create an empty store whose policers carry `contexts` timestamp slots.
    pub fn with_contexts(contexts: usize) -> Result<Self, PolicerError> {
        Self::with_config(&PolicerConfig::new(contexts))
    }

    pub fn with_config(config: &PolicerConfig) -> Result<Self, PolicerError> {
        config.validate()?;
        Ok(Self {
            policers: DashMap::new(),
            order: Mutex::new(Vec::new()),
            contexts: config.contexts,
        })
    }

    /// Create or reconfigure the policer for `mac`.
    ///
    /// A new policer starts with empty buckets. An existing one only has its
    /// rate group replaced, so accumulated tokens and timestamps carry over.
    pub fn upsert(&self, mac: MacAddr, limit_bits_per_second: u64) {
        let rate = RateScale::from_bits_per_second(limit_bits_per_second);

        if let Some(policer) = self.find(mac) {
            policer.reconfigure(rate);
            debug!(%mac, limit_bits_per_second, scale = rate.scale, "policer modified");
            return;
        }

        // Inserts and removals hold the order lock across the map update.
        let mut order = self.order.lock();
        match self.policers.entry(mac) {
            Entry::Occupied(entry) => {
                entry.get().reconfigure(rate);
                debug!(%mac, limit_bits_per_second, scale = rate.scale, "policer modified");
            }
            Entry::Vacant(entry) => {
                order.push(mac);
                entry.insert(Arc::new(Policer::new(mac, rate, self.contexts)));
                debug!(%mac, limit_bits_per_second, scale = rate.scale, "policer added");
            }
        }
    }

    /// Policer for an exact MAC match.
    pub fn find(&self, mac: MacAddr) -> Option<Arc<Policer>> {
        self.policers.get(&mac).map(|entry| Arc::clone(entry.value()))
    }

    /// Drop the policer for `mac` from the table, returning it if it existed.
    pub fn remove(&self, mac: MacAddr) -> Option<Arc<Policer>> {
        let mut order = self.order.lock();
        let (_, policer) = self.policers.remove(&mac)?;
        order.retain(|m| *m != mac);
        debug!(%mac, "policer removed");
        Some(policer)
    }

    /// All policers in the order they were first added.
    pub fn policers(&self) -> Vec<Arc<Policer>> {
        let order = self.order.lock().clone();
        order.into_iter().filter_map(|mac| self.find(mac)).collect()
    }

    pub fn len(&self) -> usize {
        self.policers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policers.is_empty()
    }

    /// Number of concurrency contexts each policer tracks.
    pub fn contexts(&self) -> usize {
        self.contexts
    }
}
