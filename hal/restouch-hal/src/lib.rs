//! Restouch Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities a resistive touch panel
//! driver needs from the board. Chip-specific code implements these traits;
//! the driver is generic over them, so the measurement logic can be tested
//! on the host against a scripted fake.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (UI, drawing layer)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  restouch-drivers (ResistiveTouchScreen)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  restouch-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!              board GPIO + ADC
//! ```
//!
//! # Traits
//!
//! - [`gpio::PinControl`] - Pin direction and digital output level
//! - [`adc::AnalogInput`] - Analog reads on a sense pin
//! - [`TouchHal`] - Everything a 4-wire panel needs, in one bound

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::{Level, PinControl, PinMode};

/// Full hardware capability required by a 4-wire resistive panel
///
/// Four lines are switched between drive and sense roles and one of them is
/// sampled by the ADC, so the board must provide both pin control and
/// analog input over the same pin identifiers.
pub trait TouchHal: PinControl + AnalogInput {}

// Blanket implementation for types that implement both traits
impl<T: PinControl + AnalogInput> TouchHal for T {}
