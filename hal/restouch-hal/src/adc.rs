//! Analog input abstraction

use crate::gpio::PinControl;

/// Analog reads on pins owned by a [`PinControl`]
///
/// Shares the pin identifier with [`PinControl`] because the same line is
/// driven on one measurement pass and sampled on the next.
pub trait AnalogInput: PinControl {
    /// Read the pin's voltage as a raw conversion result
    ///
    /// The range depends on the converter's resolution (0-1023 for the
    /// 10-bit converters these panels are usually wired to).
    fn read_analog(&mut self, pin: Self::Pin) -> u16;
}
