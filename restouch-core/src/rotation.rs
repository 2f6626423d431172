//! Rotation mapping between panel and screen coordinates
//!
//! The panel reports positions along its own X and Y sheets. How those
//! axes line up with the display depends on how the shield is mounted, so
//! one of four fixed transforms is applied:
//!
//! | rotation | screen x        | screen y        |
//! |----------|-----------------|-----------------|
//! | 0        | raw y           | raw x           |
//! | 1        | raw x           | y_pixels - raw y |
//! | 2        | y_pixels - raw y | x_pixels - raw x |
//! | 3        | x_pixels - raw x | raw y           |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::traits::Point;

/// Panel mounting orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Axes swapped
    #[default]
    R0 = 0,
    /// Y axis mirrored
    R1 = 1,
    /// Axes swapped and both mirrored
    R2 = 2,
    /// X axis mirrored
    R3 = 3,
}

impl TryFrom<u8> for Rotation {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::R0),
            1 => Ok(Rotation::R1),
            2 => Ok(Rotation::R2),
            3 => Ok(Rotation::R3),
            other => Err(ConfigError::InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation as u8
    }
}

impl Rotation {
    /// Map a panel point into screen coordinates
    pub fn map(self, raw: Point<i16>, x_pixels: u16, y_pixels: u16) -> Point<i16> {
        let (w, h) = (x_pixels as i32, y_pixels as i32);
        let (x, y) = (raw.x as i32, raw.y as i32);
        let (sx, sy) = match self {
            Rotation::R0 => (y, x),
            Rotation::R1 => (x, h - y),
            Rotation::R2 => (h - y, w - x),
            Rotation::R3 => (w - x, y),
        };
        Point::new(saturate(sx), saturate(sy))
    }

    /// Map a screen point back into panel coordinates
    ///
    /// Exact inverse of [`Rotation::map`] for the same screen size.
    pub fn unmap(self, screen: Point<i16>, x_pixels: u16, y_pixels: u16) -> Point<i16> {
        let (w, h) = (x_pixels as i32, y_pixels as i32);
        let (x, y) = (screen.x as i32, screen.y as i32);
        let (rx, ry) = match self {
            Rotation::R0 => (y, x),
            Rotation::R1 => (x, h - y),
            Rotation::R2 => (w - y, h - x),
            Rotation::R3 => (w - x, y),
        };
        Point::new(saturate(rx), saturate(ry))
    }
}

fn saturate(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from() {
        assert_eq!(Rotation::try_from(0), Ok(Rotation::R0));
        assert_eq!(Rotation::try_from(3), Ok(Rotation::R3));
        assert_eq!(
            Rotation::try_from(4),
            Err(ConfigError::InvalidRotation(4))
        );
        assert_eq!(
            Rotation::try_from(255),
            Err(ConfigError::InvalidRotation(255))
        );
        assert_eq!(u8::from(Rotation::R2), 2);
    }

    #[test]
    fn test_rotation_table() {
        let raw = Point::new(100, 50);
        assert_eq!(Rotation::R0.map(raw, 480, 320), Point::new(50, 100));
        assert_eq!(Rotation::R1.map(raw, 480, 320), Point::new(100, 270));
        assert_eq!(Rotation::R2.map(raw, 480, 320), Point::new(270, 380));
        assert_eq!(Rotation::R3.map(raw, 480, 320), Point::new(380, 50));
    }

    #[test]
    fn test_unmap_inverts_map() {
        let raw = Point::new(100, 50);
        for r in [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3] {
            assert_eq!(r.unmap(r.map(raw, 480, 320), 480, 320), raw);
        }
    }

    #[test]
    fn test_negative_input_passes_through() {
        // Corrected readings may fall below zero near the edges
        let raw = Point::new(-10, -5);
        assert_eq!(Rotation::R0.map(raw, 480, 320), Point::new(-5, -10));
        assert_eq!(Rotation::R3.map(raw, 480, 320), Point::new(490, -5));
    }
}
