//! Linear correction from ADC readings to panel pixels
//!
//! A reading is first scaled onto the screen span, then shifted and
//! multiplied by a ratio per axis:
//!
//! ```text
//! pixel = (reading * span / full_scale + shift) * ratio
//! ```
//!
//! The shift and ratio compensate for the dead band around the edges of
//! the resistive sheet. The defaults suit the common 3.5" 480x320 shields.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default ADC resolution (10-bit)
pub const DEFAULT_ADC_FULL_SCALE: u16 = 1024;

/// Readings above this are treated as "not touched" on a 10-bit ADC
pub const DEFAULT_CONTACT_LIMIT: u16 = 1000;

/// Converter resolution and no-contact threshold
///
/// With nothing pressing the sheets together the sense pin floats up to
/// the pull-up rail, so readings near full scale mean no contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdcRange {
    /// Number of converter steps (1024 for 10-bit)
    pub full_scale: u16,
    /// Highest reading still counted as contact
    pub contact_limit: u16,
}

impl Default for AdcRange {
    fn default() -> Self {
        Self {
            full_scale: DEFAULT_ADC_FULL_SCALE,
            contact_limit: DEFAULT_CONTACT_LIMIT,
        }
    }
}

impl AdcRange {
    /// Check whether a reading indicates the sheets are touching
    ///
    /// The boundary is inclusive: a reading equal to the limit is contact.
    pub fn is_contact(&self, reading: u16) -> bool {
        reading <= self.contact_limit
    }

    /// Scale a reading onto a span of pixels, truncating
    pub fn scale(&self, reading: u16, span: u16) -> i32 {
        let full_scale = self.full_scale.max(1) as i64;
        (reading as i64 * span as i64 / full_scale) as i32
    }
}

/// Per-axis shift and ratio applied to scaled readings
///
/// Ratios are not validated; a zero or negative ratio is accepted and
/// produces a degenerate mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Correction {
    /// Offset added to the scaled X reading (pixels)
    pub x_shift: i32,
    /// Offset added to the scaled Y reading (pixels)
    pub y_shift: i32,
    /// Scale factor applied after the X shift
    pub x_ratio: f32,
    /// Scale factor applied after the Y shift
    pub y_ratio: f32,
}

impl Default for Correction {
    fn default() -> Self {
        Self {
            x_shift: -50,
            y_shift: -50,
            x_ratio: 1.23,
            y_ratio: 1.29,
        }
    }
}

impl Correction {
    /// Create a correction from shifts and ratios
    pub const fn new(x_shift: i32, y_shift: i32, x_ratio: f32, y_ratio: f32) -> Self {
        Self {
            x_shift,
            y_shift,
            x_ratio,
            y_ratio,
        }
    }

    /// Correction that leaves scaled readings unchanged
    pub const fn identity() -> Self {
        Self::new(0, 0, 1.0, 1.0)
    }

    /// Apply the X shift and ratio to a scaled reading
    pub fn apply_x(&self, scaled: i32) -> i16 {
        apply(scaled, self.x_shift, self.x_ratio)
    }

    /// Apply the Y shift and ratio to a scaled reading
    pub fn apply_y(&self, scaled: i32) -> i16 {
        apply(scaled, self.y_shift, self.y_ratio)
    }
}

// Float-to-int `as` truncates toward zero and saturates at the i16 bounds.
fn apply(scaled: i32, shift: i32, ratio: f32) -> i16 {
    (scaled.saturating_add(shift) as f32 * ratio) as i16
}
