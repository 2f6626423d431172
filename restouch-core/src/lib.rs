//! Board-agnostic core logic for resistive touch panels
//!
//! This crate contains everything about reading a touch panel that does not
//! depend on how the pins are wired:
//!
//! - Panel configuration (geometry, correction, filter, ADC range)
//! - Rotation mapping between panel and screen coordinates
//! - The drift filter, in blocking and non-blocking flavours
//! - Touch traits and error types shared with the drivers

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod filter;
pub mod rotation;
pub mod traits;

pub use config::{AdcRange, ConfigError, Correction, FilterConfig, PanelGeometry};
pub use rotation::Rotation;
pub use traits::{Point, RawSample, RawSampler, TouchError, TouchPanel, TouchPoint};
