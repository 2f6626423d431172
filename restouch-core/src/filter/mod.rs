//! Drift-gated averaging filter
//!
//! A filtered reading is the per-axis mean of a run of raw samples in which
//! every sample lies within `max_drift` pixels (Manhattan distance) of the
//! sample accepted before it. Two flavours exist:
//!
//! - [`BlockingFilter`] retries until a run completes. A sample without
//!   contact throws the run away and starts over (the finger was lifted);
//!   a drifting sample is discarded and its slot is sampled again.
//! - [`OneShotFilter`] takes exactly one run and fails on the first bad
//!   sample, so its cost is bounded by the run length.
//!
//! Both are state machines fed one sample at a time, so sync and async read
//! loops share the same logic. [`read_blocking`], [`read_blocking_bounded`]
//! and [`read_non_blocking`] are the synchronous loops.
//!
//! # Usage
//!
//! ```ignore
//! let mut filter = BlockingFilter::new(FilterConfig::default());
//! loop {
//!     if let FilterStep::Complete(point) = filter.push(panel.sample_raw()) {
//!         break point;
//!     }
//! }
//! ```

pub mod run;

pub use run::SampleRun;

use crate::config::FilterConfig;
use crate::traits::touch::drift;
use crate::traits::{CancelToken, Point, RawSample, RawSampler, TouchError, TouchPoint};

/// Outcome of feeding one sample to a [`BlockingFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterStep {
    /// No contact; the run was discarded
    Restarted,
    /// Sample drifted too far from the previous one and was dropped
    Rejected,
    /// Sample joined the run
    Accepted,
    /// Sample completed the run; the filter is ready for a new run
    Complete(TouchPoint),
}

/// Cap on the raw samples a blocking read may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleLimit {
    /// Keep sampling until a run completes
    #[default]
    Unbounded,
    /// Give up after this many raw samples
    AtMost(u32),
}

impl SampleLimit {
    fn is_reached(&self, taken: u32) -> bool {
        match self {
            SampleLimit::Unbounded => false,
            SampleLimit::AtMost(max) => taken >= *max,
        }
    }
}

/// Filter that retries until a stable run is collected
#[derive(Debug, Clone)]
pub struct BlockingFilter {
    config: FilterConfig,
    run: SampleRun,
}

impl BlockingFilter {
    pub const fn new(config: FilterConfig) -> Self {
        Self {
            config,
            run: SampleRun::new(),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Samples accepted into the current run
    pub fn run(&self) -> &SampleRun {
        &self.run
    }

    /// Discard the current run
    pub fn reset(&mut self) {
        self.run.clear();
    }

    /// Feed one raw sample
    ///
    /// Restarts and drift rejections are traced here, so every read loop
    /// built on the filter logs the same events.
    pub fn push(&mut self, sample: RawSample) -> FilterStep {
        let RawSample::Contact(point) = sample else {
            self.run.clear();
            #[cfg(feature = "defmt")]
            defmt::trace!("touch: contact lost, run restarted");
            return FilterStep::Restarted;
        };

        if exceeds_drift(&self.run, point, &self.config) {
            #[cfg(feature = "defmt")]
            defmt::trace!("touch: sample {} rejected for drift", point);
            return FilterStep::Rejected;
        }

        complete_or_accept(&mut self.run, point, &self.config)
            .map_or(FilterStep::Accepted, FilterStep::Complete)
    }
}

/// Filter that makes a single bounded pass
#[derive(Debug, Clone)]
pub struct OneShotFilter {
    config: FilterConfig,
    run: SampleRun,
}

impl OneShotFilter {
    pub const fn new(config: FilterConfig) -> Self {
        Self {
            config,
            run: SampleRun::new(),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn run(&self) -> &SampleRun {
        &self.run
    }

    pub fn reset(&mut self) {
        self.run.clear();
    }

    /// Feed one raw sample
    ///
    /// Returns `Ok(None)` while the run is incomplete and `Ok(Some(point))`
    /// when it completes. Any error discards the run.
    pub fn push(&mut self, sample: RawSample) -> Result<Option<TouchPoint>, TouchError> {
        let RawSample::Contact(point) = sample else {
            self.run.clear();
            return Err(TouchError::NoContact);
        };

        if exceeds_drift(&self.run, point, &self.config) {
            self.run.clear();
            return Err(TouchError::ExcessiveDrift);
        }

        Ok(complete_or_accept(&mut self.run, point, &self.config))
    }
}

fn exceeds_drift(run: &SampleRun, point: Point<i16>, config: &FilterConfig) -> bool {
    run.last()
        .is_some_and(|prev| drift(prev, point) > config.max_drift() as u32)
}

// Appends the sample; if that fills the run, returns its mean and starts a
// new run.
fn complete_or_accept(
    run: &mut SampleRun,
    point: Point<i16>,
    config: &FilterConfig,
) -> Option<TouchPoint> {
    run.push(point);
    if run.len() < config.run_length() {
        return None;
    }
    let mean = run.mean();
    run.clear();
    mean
}

/// Read a filtered point, retrying until a run completes
///
/// Never returns while the panel is untouched or the samples keep
/// drifting. Use [`read_blocking_bounded`] where that is unacceptable.
pub fn read_blocking<S: RawSampler + ?Sized>(
    sampler: &mut S,
    config: &FilterConfig,
) -> TouchPoint {
    let mut filter = BlockingFilter::new(*config);
    loop {
        if let FilterStep::Complete(point) = filter.push(sampler.sample_raw()) {
            return point;
        }
    }
}

/// Read a filtered point with a sample cap and cancellation
///
/// `cancel` is checked before every raw sample. Fails with
/// [`TouchError::Cancelled`] or [`TouchError::SampleLimit`].
pub fn read_blocking_bounded<S, C>(
    sampler: &mut S,
    config: &FilterConfig,
    limit: SampleLimit,
    cancel: &C,
) -> Result<TouchPoint, TouchError>
where
    S: RawSampler + ?Sized,
    C: CancelToken + ?Sized,
{
    let mut filter = BlockingFilter::new(*config);
    let mut taken: u32 = 0;
    loop {
        if cancel.is_cancelled() {
            return Err(TouchError::Cancelled);
        }
        if limit.is_reached(taken) {
            #[cfg(feature = "defmt")]
            defmt::debug!("touch: sample limit reached after {} samples", taken);
            return Err(TouchError::SampleLimit);
        }
        taken = taken.saturating_add(1);

        if let FilterStep::Complete(point) = filter.push(sampler.sample_raw()) {
            return Ok(point);
        }
    }
}

/// Read a filtered point in one pass of exactly `cycles` samples
///
/// Stops at the first sample without contact or with excessive drift.
pub fn read_non_blocking<S: RawSampler + ?Sized>(
    sampler: &mut S,
    config: &FilterConfig,
) -> Result<TouchPoint, TouchError> {
    let mut filter = OneShotFilter::new(*config);
    loop {
        match filter.push(sampler.sample_raw()) {
            Ok(Some(point)) => return Ok(point),
            Ok(None) => {}
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("touch: one-shot read aborted: {}", e);
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicBool;
    use heapless::Deque;

    use crate::traits::NeverCancel;

    const MISS: RawSample = RawSample::NoContact { x: true, y: true };

    fn hit(x: i16, y: i16) -> RawSample {
        RawSample::Contact(Point::new(x, y))
    }

    /// Replays a fixed sequence of samples, then reports no contact
    struct Scripted {
        samples: Deque<RawSample, 64>,
        taken: usize,
    }

    impl Scripted {
        fn new(samples: &[RawSample]) -> Self {
            let mut queue = Deque::new();
            for s in samples {
                queue.push_back(*s).unwrap();
            }
            Self {
                samples: queue,
                taken: 0,
            }
        }
    }

    impl RawSampler for Scripted {
        fn sample_raw(&mut self) -> RawSample {
            self.taken += 1;
            self.samples.pop_front().unwrap_or(MISS)
        }
    }

    fn config(cycles: u8, max_drift: u16) -> FilterConfig {
        FilterConfig::new(cycles, max_drift).unwrap()
    }

    #[test]
    fn test_blocking_averages_stable_run() {
        let mut s = Scripted::new(&[hit(10, 10), hit(12, 11), hit(11, 12)]);
        assert_eq!(read_blocking(&mut s, &config(3, 10)), Point::new(11, 11));
        assert_eq!(s.taken, 3);
    }

    /// Alternates between two points forever
    struct Alternating {
        points: [Point<i16>; 2],
        taken: usize,
    }

    impl RawSampler for Alternating {
        fn sample_raw(&mut self) -> RawSample {
            let p = self.points[self.taken % 2];
            self.taken += 1;
            RawSample::Contact(p)
        }
    }

    #[test]
    fn test_averages_full_length_run() {
        let mut s = Alternating {
            points: [Point::new(10, 10), Point::new(12, 10)],
            taken: 0,
        };
        // (128 * 10 + 127 * 12) / 255 = 10.99
        assert_eq!(read_blocking(&mut s, &config(255, 2)), Point::new(10, 10));
        assert_eq!(s.taken, 255);

        s.taken = 0;
        assert_eq!(
            read_non_blocking(&mut s, &config(255, 2)),
            Ok(Point::new(10, 10))
        );
        assert_eq!(s.taken, 255);
    }

    #[test]
    fn test_blocking_restarts_on_lost_contact() {
        // The first two samples must not leak into the average
        let mut s = Scripted::new(&[
            hit(100, 100),
            hit(101, 101),
            MISS,
            hit(10, 10),
            hit(10, 12),
            hit(13, 10),
        ]);
        assert_eq!(read_blocking(&mut s, &config(3, 10)), Point::new(11, 10));
        assert_eq!(s.taken, 6);
    }

    #[test]
    fn test_blocking_retries_drifting_slot() {
        let mut s = Scripted::new(&[hit(10, 10), hit(40, 10), hit(12, 10), hit(14, 10)]);
        // (40, 10) is dropped without restarting the run
        assert_eq!(read_blocking(&mut s, &config(3, 5)), Point::new(12, 10));
        assert_eq!(s.taken, 4);
    }

    #[test]
    fn test_drift_boundary_is_inclusive() {
        let mut f = BlockingFilter::new(config(2, 10));
        assert_eq!(f.push(hit(0, 0)), FilterStep::Accepted);
        assert_eq!(f.push(hit(6, 5)), FilterStep::Rejected);
        assert_eq!(f.push(hit(5, 5)), FilterStep::Complete(Point::new(2, 2)));
    }

    #[test]
    fn test_drift_compares_with_last_accepted() {
        let mut f = BlockingFilter::new(config(3, 10));
        assert_eq!(f.push(hit(0, 0)), FilterStep::Accepted);
        assert_eq!(f.push(hit(50, 0)), FilterStep::Rejected);
        // Within 10 of (0, 0), not of the rejected (50, 0)
        assert_eq!(f.push(hit(8, 0)), FilterStep::Accepted);
        assert_eq!(f.run().len(), 2);
    }

    #[test]
    fn test_blocking_filter_reusable_after_complete() {
        let mut f = BlockingFilter::new(config(1, 0));
        assert_eq!(f.push(hit(3, 4)), FilterStep::Complete(Point::new(3, 4)));
        // The next run starts fresh, so a far sample is accepted
        assert_eq!(f.push(hit(300, 4)), FilterStep::Complete(Point::new(300, 4)));
    }

    #[test]
    fn test_single_cycle_returns_first_sample() {
        let mut s = Scripted::new(&[MISS, hit(7, 9)]);
        assert_eq!(read_blocking(&mut s, &config(1, 0)), Point::new(7, 9));
    }

    #[test]
    fn test_non_blocking_success() {
        let mut s = Scripted::new(&[hit(10, 10), hit(12, 11), hit(11, 12)]);
        assert_eq!(
            read_non_blocking(&mut s, &config(3, 10)),
            Ok(Point::new(11, 11))
        );
        assert_eq!(s.taken, 3);
    }

    #[test]
    fn test_non_blocking_stops_at_lost_contact() {
        let mut s = Scripted::new(&[hit(10, 10), MISS, hit(10, 10)]);
        assert_eq!(
            read_non_blocking(&mut s, &config(3, 10)),
            Err(TouchError::NoContact)
        );
        // The third sample is never taken
        assert_eq!(s.taken, 2);
    }

    #[test]
    fn test_non_blocking_stops_at_drift() {
        let mut s = Scripted::new(&[hit(10, 10), hit(10, 30), hit(10, 10)]);
        assert_eq!(
            read_non_blocking(&mut s, &config(3, 10)),
            Err(TouchError::ExcessiveDrift)
        );
        assert_eq!(s.taken, 2);
    }

    #[test]
    fn test_non_blocking_partial_axis_loss() {
        let mut s = Scripted::new(&[RawSample::NoContact { x: false, y: true }]);
        assert_eq!(
            read_non_blocking(&mut s, &config(5, 50)),
            Err(TouchError::NoContact)
        );
    }

    #[test]
    fn test_one_shot_filter_clears_on_error() {
        let mut f = OneShotFilter::new(config(3, 10));
        assert_eq!(f.push(hit(1, 1)), Ok(None));
        assert_eq!(f.push(MISS), Err(TouchError::NoContact));
        assert!(f.run().is_empty());
    }

    #[test]
    fn test_bounded_gives_up_without_contact() {
        let mut s = Scripted::new(&[]);
        let result = read_blocking_bounded(
            &mut s,
            &config(5, 50),
            SampleLimit::AtMost(20),
            &NeverCancel,
        );
        assert_eq!(result, Err(TouchError::SampleLimit));
        assert_eq!(s.taken, 20);
    }

    #[test]
    fn test_bounded_succeeds_within_limit() {
        let mut s = Scripted::new(&[MISS, hit(10, 10), hit(12, 11), hit(11, 12)]);
        let result = read_blocking_bounded(
            &mut s,
            &config(3, 10),
            SampleLimit::AtMost(4),
            &NeverCancel,
        );
        assert_eq!(result, Ok(Point::new(11, 11)));
    }

    #[test]
    fn test_bounded_honours_cancellation() {
        let mut s = Scripted::new(&[hit(10, 10)]);
        let cancel = AtomicBool::new(true);
        let result =
            read_blocking_bounded(&mut s, &config(3, 10), SampleLimit::Unbounded, &cancel);
        assert_eq!(result, Err(TouchError::Cancelled));
        assert_eq!(s.taken, 0);
    }

    #[test]
    fn test_zero_limit_takes_no_samples() {
        let mut s = Scripted::new(&[hit(10, 10)]);
        let result =
            read_blocking_bounded(&mut s, &config(1, 10), SampleLimit::AtMost(0), &NeverCancel);
        assert_eq!(result, Err(TouchError::SampleLimit));
        assert_eq!(s.taken, 0);
    }
}
