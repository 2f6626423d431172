//! Run of accepted samples

use crate::traits::{Point, TouchPoint};

/// Running totals of the current filter run
///
/// Only the sums, the count, the last sample and the bounding box are kept,
/// so a run may be as long as the `u8` run length allows.
#[derive(Debug, Clone, Default)]
pub struct SampleRun {
    sum_x: i32,
    sum_y: i32,
    count: u16,
    last: Option<Point<i16>>,
    min: Point<i16>,
    max: Point<i16>,
}

impl SampleRun {
    /// Create an empty run
    pub const fn new() -> Self {
        Self {
            sum_x: 0,
            sum_y: 0,
            count: 0,
            last: None,
            min: Point::new(0, 0),
            max: Point::new(0, 0),
        }
    }

    /// Append a sample
    pub fn push(&mut self, sample: Point<i16>) {
        if self.last.is_none() {
            self.min = sample;
            self.max = sample;
        } else {
            self.min = Point::new(self.min.x.min(sample.x), self.min.y.min(sample.y));
            self.max = Point::new(self.max.x.max(sample.x), self.max.y.max(sample.y));
        }
        self.sum_x += sample.x as i32;
        self.sum_y += sample.y as i32;
        self.count = self.count.saturating_add(1);
        self.last = Some(sample);
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Most recently accepted sample
    pub fn last(&self) -> Option<Point<i16>> {
        self.last
    }

    /// Per-axis mean of the run
    ///
    /// Division truncates toward zero. The result is clamped into the
    /// unsigned pixel range, so a run centred left of or above the screen
    /// edge reads as 0.
    pub fn mean(&self) -> Option<TouchPoint> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as i32;
        Some(Point::new(
            to_pixel(self.sum_x / n),
            to_pixel(self.sum_y / n),
        ))
    }

    /// Manhattan extent of the run's bounding box
    ///
    /// Useful when tuning the drift tolerance: a steady press keeps this
    /// well under `max_drift`.
    pub fn spread(&self) -> u32 {
        if self.count == 0 {
            return 0;
        }
        (self.max.x as i32 - self.min.x as i32) as u32
            + (self.max.y as i32 - self.min.y as i32) as u32
    }
}

fn to_pixel(v: i32) -> u16 {
    v.clamp(0, u16::MAX as i32) as u16
}
