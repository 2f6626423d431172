//! Drift filter configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Default number of samples averaged per reading
pub const DEFAULT_FILTER_CYCLES: u8 = 5;

/// Default drift tolerance between consecutive samples (pixels)
pub const DEFAULT_MAX_DRIFT: u16 = 50;

/// Drift filter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterConfig {
    cycles: u8,
    max_drift: u16,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_FILTER_CYCLES,
            max_drift: DEFAULT_MAX_DRIFT,
        }
    }
}

impl FilterConfig {
    /// Create a validated filter configuration
    ///
    /// # Arguments
    /// - `cycles`: Samples averaged per reading, 1-255
    /// - `max_drift`: Largest Manhattan distance in pixels allowed between
    ///   consecutive accepted samples
    pub fn new(cycles: u8, max_drift: u16) -> Result<Self, ConfigError> {
        if cycles == 0 {
            return Err(ConfigError::InvalidFilterCycles(cycles));
        }
        Ok(Self { cycles, max_drift })
    }

    /// Samples averaged per reading
    pub fn cycles(&self) -> u8 {
        self.cycles
    }

    /// Drift tolerance in pixels
    pub fn max_drift(&self) -> u16 {
        self.max_drift
    }

    /// Run length as used by the filters
    ///
    /// Deserialized configs bypass [`FilterConfig::new`], so a run length
    /// of zero is treated as one here.
    pub(crate) fn run_length(&self) -> usize {
        self.cycles.max(1) as usize
    }
}
