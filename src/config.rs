// src/config.rs

//! Configuration types for the policer engine

// dependencies
use crate::errors::PolicerError;

/// Configuration for policer engine behavior
#[derive(Debug, Clone)]
pub struct PolicerConfig {
    pub(crate) contexts: usize,
    pub(crate) enabled: bool,
}

impl PolicerConfig {
    /// Create a new configuration for `contexts` concurrent workers
    pub fn new(contexts: usize) -> Self {
        Self {
            contexts,
            enabled: true,
        }
    }

    /// Builder-style: set the number of concurrency contexts
    pub fn contexts(mut self, contexts: usize) -> Self {
        self.contexts = contexts;
        self
    }

    /// Builder-style: set whether policing starts enabled
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PolicerError> {
        if self.contexts == 0 {
            return Err(PolicerError::InvalidContextCount);
        }
        Ok(())
    }
}

impl Default for PolicerConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
