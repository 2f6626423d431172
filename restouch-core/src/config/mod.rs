//! Configuration types
//!
//! Panel settings are fixed or adjusted by the application at runtime.
//! Loading and persisting them is left to the application; with the `serde`
//! feature enabled every type here can be read from its config store.

pub mod correction;
pub mod filter;
pub mod panel;

pub use correction::*;
pub use filter::*;
pub use panel::*;

use core::fmt;

/// Errors rejected when a panel is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Rotation outside 0-3
    InvalidRotation(u8),
    /// Screen width or height of zero pixels
    ZeroDimension,
    /// Filter run length of zero
    InvalidFilterCycles(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRotation(r) => write!(f, "invalid rotation {} (expected 0-3)", r),
            ConfigError::ZeroDimension => f.write_str("screen dimensions must be non-zero"),
            ConfigError::InvalidFilterCycles(c) => {
                write!(f, "invalid filter cycles {} (expected 1-255)", c)
            }
        }
    }
}
