//! GPIO pin role abstractions
//!
//! Resistive panels need pins that change direction at runtime, so instead
//! of one type per pin state the board exposes a controller addressed by
//! pin identifier.

/// Direction and pull configuration of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinMode {
    /// Push-pull output
    Output,
    /// High-impedance input with the internal pull-up enabled
    InputPullUp,
}

/// Digital output level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

/// Runtime pin direction and output control
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait PinControl {
    /// Pin identifier (a pin number, or a chip-specific pin handle)
    type Pin: Copy;

    /// Configure the direction and pull of a pin
    fn set_mode(&mut self, pin: Self::Pin, mode: PinMode);

    /// Drive an output pin to a level
    fn write(&mut self, pin: Self::Pin, level: Level);

    /// Drive the pin high (logic 1)
    fn set_high(&mut self, pin: Self::Pin) {
        self.write(pin, Level::High);
    }

    /// Drive the pin low (logic 0)
    fn set_low(&mut self, pin: Self::Pin) {
        self.write(pin, Level::Low);
    }
}
