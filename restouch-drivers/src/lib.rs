//! Touch panel driver implementations
//!
//! This crate provides concrete implementations of the traits defined in
//! restouch-core, built on the hardware traits of restouch-hal:
//!
//! - 4-wire resistive panels read through GPIO and an ADC

#![no_std]
#![deny(unsafe_code)]

pub mod resistive;

pub use resistive::{Axis, PanelPins, ResistiveTouchScreen};
