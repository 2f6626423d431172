//! 4-wire resistive touch panel
//!
//! Reads the panel by switching its electrodes between drive and sense
//! roles (see [`pins`]), converting each axis reading to pixels with a
//! linear correction, rotating into screen coordinates and filtering runs
//! of samples for stability.
//!
//! # Usage
//!
//! ```ignore
//! let pins = PanelPins::new(A0, A1, A2, A3);
//! let mut touch = ResistiveTouchScreen::new(board, pins, 480, 320, 1)?;
//! touch.set_correction(-50, -50, 1.23, 1.29);
//! touch.set_filter(5, 50)?;
//!
//! // In the UI poll loop:
//! if let Ok(point) = touch.read_non_blocking() {
//!     ui.press(point.x, point.y);
//! }
//! ```

pub mod pins;

pub use pins::{Axis, PanelPins};

use embedded_hal::delay::DelayNs;
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

use restouch_core::filter::{self, BlockingFilter, FilterStep, SampleLimit};
use restouch_core::traits::CancelToken;
use restouch_core::{
    AdcRange, ConfigError, Correction, FilterConfig, PanelGeometry, Point, RawSample, RawSampler,
    TouchError, TouchPanel, TouchPoint,
};
use restouch_hal::TouchHal;

/// 4-wire resistive touch panel driver
///
/// Owns the hardware handle for the panel's four pins. All reads toggle
/// pin directions, so access must be serialized; `&mut self` enforces
/// that within one owner.
pub struct ResistiveTouchScreen<H: TouchHal> {
    hal: H,
    pins: PanelPins<H::Pin>,
    geometry: PanelGeometry,
    correction: Correction,
    filter: FilterConfig,
    adc: AdcRange,
}

impl<H: TouchHal> ResistiveTouchScreen<H> {
    /// Create a new panel driver
    ///
    /// # Arguments
    /// - `hal`: Board pin and ADC access
    /// - `pins`: The panel electrodes
    /// - `x_pixels`, `y_pixels`: Screen size along the panel axes
    /// - `rotation`: Rotation mode, 0-3
    ///
    /// Fails with [`ConfigError::InvalidRotation`] for rotations above 3.
    pub fn new(
        hal: H,
        pins: PanelPins<H::Pin>,
        x_pixels: u16,
        y_pixels: u16,
        rotation: u8,
    ) -> Result<Self, ConfigError> {
        let geometry = PanelGeometry::new(x_pixels, y_pixels, rotation)?;
        Ok(Self::with_geometry(hal, pins, geometry))
    }

    /// Create a driver from a validated geometry, with default correction,
    /// filter and ADC range
    pub fn with_geometry(hal: H, pins: PanelPins<H::Pin>, geometry: PanelGeometry) -> Self {
        Self {
            hal,
            pins,
            geometry,
            correction: Correction::default(),
            filter: FilterConfig::default(),
            adc: AdcRange::default(),
        }
    }

    /// Set the filter run length and drift tolerance
    ///
    /// On error the previous settings are kept.
    pub fn set_filter(&mut self, cycles: u8, max_drift: u16) -> Result<(), ConfigError> {
        self.filter = FilterConfig::new(cycles, max_drift)?;
        Ok(())
    }

    pub fn set_filter_config(&mut self, config: FilterConfig) {
        self.filter = config;
    }

    /// Set the per-axis shift and ratio
    pub fn set_correction(&mut self, x_shift: i32, y_shift: i32, x_ratio: f32, y_ratio: f32) {
        self.correction = Correction::new(x_shift, y_shift, x_ratio, y_ratio);
    }

    pub fn set_correction_config(&mut self, correction: Correction) {
        self.correction = correction;
    }

    /// Set the converter resolution and contact threshold
    pub fn set_adc_range(&mut self, adc: AdcRange) {
        self.adc = adc;
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    pub fn correction(&self) -> &Correction {
        &self.correction
    }

    pub fn filter_config(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn adc_range(&self) -> &AdcRange {
        &self.adc
    }

    pub fn pins(&self) -> &PanelPins<H::Pin> {
        &self.pins
    }

    /// Release the hardware handle and pins
    pub fn release(self) -> (H, PanelPins<H::Pin>) {
        (self.hal, self.pins)
    }

    /// Take one unfiltered sample of both axes
    ///
    /// Both passes always run, so the pins are left in the Y-pass roles
    /// even when the X pass finds no contact.
    pub fn sample_raw(&mut self) -> RawSample {
        let x = self.measure_axis(Axis::X);
        let y = self.measure_axis(Axis::Y);

        match (x, y) {
            (Some(x), Some(y)) => RawSample::Contact(self.geometry.to_screen(Point::new(x, y))),
            (x, y) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("touch: no contact (x: {}, y: {})", x.is_none(), y.is_none());
                RawSample::NoContact {
                    x: x.is_none(),
                    y: y.is_none(),
                }
            }
        }
    }

    /// Read a filtered point, retrying until a stable run is collected
    ///
    /// Busy-polls the panel and never returns while it is untouched. See
    /// [`Self::read_blocking_bounded`], [`Self::read_blocking_paced`] and
    /// [`Self::read_blocking_async`] for the alternatives.
    pub fn read_blocking(&mut self) -> TouchPoint {
        let config = self.filter;
        filter::read_blocking(self, &config)
    }

    /// Read a filtered point with a raw sample cap and cancellation token
    pub fn read_blocking_bounded<C: CancelToken + ?Sized>(
        &mut self,
        limit: SampleLimit,
        cancel: &C,
    ) -> Result<TouchPoint, TouchError> {
        let config = self.filter;
        filter::read_blocking_bounded(self, &config, limit, cancel)
    }

    /// Read a filtered point in one pass of `cycles` samples
    pub fn read_non_blocking(&mut self) -> Result<TouchPoint, TouchError> {
        let config = self.filter;
        filter::read_non_blocking(self, &config)
    }

    /// Blocking read that sleeps `interval_us` between raw samples
    pub fn read_blocking_paced<D: DelayNs>(
        &mut self,
        delay: &mut D,
        interval_us: u32,
    ) -> TouchPoint {
        let mut filter = BlockingFilter::new(self.filter);
        loop {
            if let FilterStep::Complete(point) = filter.push(self.sample_raw()) {
                return point;
            }
            delay.delay_us(interval_us);
        }
    }

    /// Blocking read that awaits `interval_us` between raw samples
    ///
    /// Yields to the executor on every retry instead of spinning, so other
    /// tasks keep running while the panel is untouched. Dropping the future
    /// cancels the read.
    pub async fn read_blocking_async<D: AsyncDelayNs>(
        &mut self,
        delay: &mut D,
        interval_us: u32,
    ) -> TouchPoint {
        let mut filter = BlockingFilter::new(self.filter);
        loop {
            if let FilterStep::Complete(point) = filter.push(self.sample_raw()) {
                #[cfg(feature = "defmt")]
                defmt::debug!("touch: {}", point);
                return point;
            }
            delay.delay_us(interval_us).await;
        }
    }

    // Corrected panel coordinate for one axis, or None without contact
    fn measure_axis(&mut self, axis: Axis) -> Option<i16> {
        let reading = self.pins.measure(&mut self.hal, axis);
        if !self.adc.is_contact(reading) {
            return None;
        }
        Some(match axis {
            Axis::X => self
                .correction
                .apply_x(self.adc.scale(reading, self.geometry.x_pixels)),
            Axis::Y => self
                .correction
                .apply_y(self.adc.scale(reading, self.geometry.y_pixels)),
        })
    }
}

impl<H: TouchHal> RawSampler for ResistiveTouchScreen<H> {
    fn sample_raw(&mut self) -> RawSample {
        ResistiveTouchScreen::sample_raw(self)
    }
}

impl<H: TouchHal> TouchPanel for ResistiveTouchScreen<H> {
    fn read_blocking(&mut self) -> TouchPoint {
        ResistiveTouchScreen::read_blocking(self)
    }

    fn read_non_blocking(&mut self) -> Result<TouchPoint, TouchError> {
        ResistiveTouchScreen::read_non_blocking(self)
    }
}
