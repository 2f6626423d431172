//! Pin role switching
//!
//! A 4-wire panel has two resistive sheets, each with an electrode on both
//! edges. To measure one axis the other sheet is driven as a voltage
//! divider (plus edge high, minus edge low) and the measured sheet's plus
//! electrode is sampled. The measured sheet's electrodes are switched to
//! inputs with pull-ups so that, with nothing pressing the sheets together,
//! the sense pin floats up to the rail.
//!
//! ```text
//!              X pass                       Y pass
//!   Y+ : output, high              X+ : output, high
//!   Y- : output, low               X- : output, low
//!   X+ : input pull-up (sampled)   Y+ : input pull-up (sampled)
//!   X- : input pull-up             Y- : input pull-up
//! ```

use restouch_hal::{PinControl, PinMode, TouchHal};

/// Measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

/// The four panel electrodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelPins<P> {
    /// X- electrode
    pub x_minus: P,
    /// Y- electrode
    pub y_minus: P,
    /// X+ electrode (needs ADC)
    pub x_plus: P,
    /// Y+ electrode (needs ADC)
    pub y_plus: P,
}

impl<P: Copy> PanelPins<P> {
    /// Group the panel pins
    ///
    /// Argument order follows the common shield pinout (X-, Y-, X+, Y+ on
    /// A0-A3).
    pub const fn new(x_minus: P, y_minus: P, x_plus: P, y_plus: P) -> Self {
        Self {
            x_minus,
            y_minus,
            x_plus,
            y_plus,
        }
    }

    /// Configure the pins to measure `axis`
    ///
    /// Returns the pin to sample.
    pub fn drive<H>(&self, hal: &mut H, axis: Axis) -> P
    where
        H: PinControl<Pin = P> + ?Sized,
    {
        // (drive high, drive low, sense, sense return)
        let (high, low, sense, sense_return) = match axis {
            Axis::X => (self.y_plus, self.y_minus, self.x_plus, self.x_minus),
            Axis::Y => (self.x_plus, self.x_minus, self.y_plus, self.y_minus),
        };

        hal.set_mode(high, PinMode::Output);
        hal.set_mode(low, PinMode::Output);
        hal.set_mode(sense, PinMode::InputPullUp);
        hal.set_mode(sense_return, PinMode::InputPullUp);
        hal.set_high(high);
        hal.set_low(low);

        sense
    }

    /// Drive `axis` and read its sense pin
    ///
    /// The first conversion after a role switch reads low (940-1000 where
    /// ~1015 is expected with no touch) and is always discarded.
    pub fn measure<H>(&self, hal: &mut H, axis: Axis) -> u16
    where
        H: TouchHal<Pin = P> + ?Sized,
    {
        let sense = self.drive(hal, axis);
        let _settling = hal.read_analog(sense);
        hal.read_analog(sense)
    }
}
