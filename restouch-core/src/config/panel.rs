//! Panel geometry

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::rotation::Rotation;
use crate::traits::Point;

/// Default screen size along the panel's X axis
pub const DEFAULT_X_PIXELS: u16 = 480;

/// Default screen size along the panel's Y axis
pub const DEFAULT_Y_PIXELS: u16 = 320;

/// Screen size and orientation of a panel
///
/// `x_pixels` and `y_pixels` are measured along the panel's own axes (the
/// X and Y resistive sheets), before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelGeometry {
    /// Pixels along the panel's X axis
    pub x_pixels: u16,
    /// Pixels along the panel's Y axis
    pub y_pixels: u16,
    /// Mapping from panel to screen coordinates
    pub rotation: Rotation,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            x_pixels: DEFAULT_X_PIXELS,
            y_pixels: DEFAULT_Y_PIXELS,
            rotation: Rotation::R0,
        }
    }
}

impl PanelGeometry {
    /// Create a validated geometry
    ///
    /// # Arguments
    /// - `x_pixels`, `y_pixels`: Screen size along the panel axes
    /// - `rotation`: Rotation mode, 0-3
    pub fn new(x_pixels: u16, y_pixels: u16, rotation: u8) -> Result<Self, ConfigError> {
        if x_pixels == 0 || y_pixels == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        Ok(Self {
            x_pixels,
            y_pixels,
            rotation: Rotation::try_from(rotation)?,
        })
    }

    /// Map a corrected panel point into screen coordinates
    pub fn to_screen(&self, raw: Point<i16>) -> Point<i16> {
        self.rotation.map(raw, self.x_pixels, self.y_pixels)
    }

    /// Map a screen point back into panel coordinates
    pub fn to_panel(&self, screen: Point<i16>) -> Point<i16> {
        self.rotation.unmap(screen, self.x_pixels, self.y_pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let g = PanelGeometry::default();
        assert_eq!(g.x_pixels, 480);
        assert_eq!(g.y_pixels, 320);
        assert_eq!(g.rotation, Rotation::R0);
    }

    #[test]
    fn test_rejects_bad_rotation() {
        assert_eq!(
            PanelGeometry::new(480, 320, 4),
            Err(ConfigError::InvalidRotation(4))
        );
        assert!(PanelGeometry::new(480, 320, 3).is_ok());
    }

    #[test]
    fn test_rejects_zero_size() {
        assert_eq!(
            PanelGeometry::new(0, 320, 0),
            Err(ConfigError::ZeroDimension)
        );
        assert_eq!(
            PanelGeometry::new(480, 0, 1),
            Err(ConfigError::ZeroDimension)
        );
    }

    #[test]
    fn test_screen_round_trip() {
        let g = PanelGeometry::new(480, 320, 2).unwrap();
        let p = Point::new(17, 300);
        assert_eq!(g.to_panel(g.to_screen(p)), p);
    }
}
