//! Touch sample types and panel traits

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

/// A point in panel or screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Filtered touch position in screen pixels
pub type TouchPoint = Point<u16>;

/// Manhattan distance between two samples
pub fn drift(a: Point<i16>, b: Point<i16>) -> u32 {
    (a.x as i32 - b.x as i32).unsigned_abs() + (a.y as i32 - b.y as i32).unsigned_abs()
}

/// One unfiltered measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawSample {
    /// Both axes read within range; the point is already rotated into
    /// screen coordinates
    Contact(Point<i16>),
    /// At least one axis read above the contact limit
    NoContact {
        /// X axis had no contact
        x: bool,
        /// Y axis had no contact
        y: bool,
    },
}

impl RawSample {
    /// The rotated point, if both axes had contact
    pub fn point(&self) -> Option<Point<i16>> {
        match self {
            RawSample::Contact(p) => Some(*p),
            RawSample::NoContact { .. } => None,
        }
    }

    /// Check whether both axes had contact
    pub fn is_contact(&self) -> bool {
        matches!(self, RawSample::Contact(_))
    }
}

/// Errors that can occur when reading a filtered touch point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// A sample read out of range on one axis (panel not touched)
    NoContact,
    /// Consecutive samples disagreed by more than the drift tolerance
    ExcessiveDrift,
    /// The cancellation token was set during a blocking read
    Cancelled,
    /// A bounded blocking read used up its raw sample budget
    SampleLimit,
}

impl fmt::Display for TouchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TouchError::NoContact => "no contact",
            TouchError::ExcessiveDrift => "excessive drift between samples",
            TouchError::Cancelled => "read cancelled",
            TouchError::SampleLimit => "sample limit reached",
        })
    }
}

/// Source of unfiltered touch samples
///
/// Takes `&mut self` because each sample reconfigures the panel pins.
pub trait RawSampler {
    /// Take one raw measurement of both axes
    fn sample_raw(&mut self) -> RawSample;
}

/// A touch panel that produces filtered positions
pub trait TouchPanel: RawSampler {
    /// Read a filtered point, retrying until a stable run is collected
    ///
    /// This may never return if the panel is not touched.
    fn read_blocking(&mut self) -> TouchPoint;

    /// Read a filtered point in a single bounded pass
    ///
    /// Fails on the first out-of-range or drifting sample.
    fn read_non_blocking(&mut self) -> Result<TouchPoint, TouchError>;

    /// Check whether the panel is currently touched
    fn is_touched(&mut self) -> bool {
        self.sample_raw().is_contact()
    }
}

/// Cooperative cancellation for blocking reads
///
/// Checked once before every raw sample.
pub trait CancelToken {
    /// Check whether the read should stop
    fn is_cancelled(&self) -> bool;
}

impl CancelToken for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancelToken + ?Sized> CancelToken for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Token that never cancels
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_is_manhattan() {
        assert_eq!(drift(Point::new(10, 10), Point::new(12, 11)), 3);
        assert_eq!(drift(Point::new(12, 11), Point::new(10, 10)), 3);
        assert_eq!(drift(Point::new(-5, 0), Point::new(5, -3)), 13);
        assert_eq!(
            drift(Point::new(i16::MIN, i16::MIN), Point::new(i16::MAX, i16::MAX)),
            2 * 65535
        );
    }

    #[test]
    fn test_raw_sample_accessors() {
        let hit = RawSample::Contact(Point::new(-1, 3));
        assert!(hit.is_contact());
        assert_eq!(hit.point(), Some(Point::new(-1, 3)));

        let miss = RawSample::NoContact { x: true, y: false };
        assert!(!miss.is_contact());
        assert_eq!(miss.point(), None);
    }

    #[test]
    fn test_cancel_tokens() {
        let flag = AtomicBool::new(false);
        assert!(!flag.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(flag.is_cancelled());
        assert!((&flag).is_cancelled());
        assert!(!NeverCancel.is_cancelled());
    }
}
