//! Touch abstraction traits
//!
//! These traits define the interface between the filtering logic and the
//! hardware-specific panel drivers.

pub mod touch;

pub use touch::{
    CancelToken, NeverCancel, Point, RawSample, RawSampler, TouchError, TouchPanel, TouchPoint,
};
