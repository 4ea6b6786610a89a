//! 8-bit RGB color

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived luminance `Y = (299 R + 587 G + 114 B) / 1000`, in 0..=255
    pub fn luminance(self) -> u8 {
        let y = (299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)) / 1000;
        y as u8
    }

    /// `#rrggbb`
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgb(r, g, b)` form
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_of_grays() {
        for v in [0u8, 127, 128, 255] {
            assert_eq!(Rgb::new(v, v, v).luminance(), v);
        }
    }

    #[test]
    fn test_hex() {
        assert_eq!(Rgb::new(0xfc, 0x29, 0x29).hex(), "#fc2929");
        assert_eq!(Rgb::new(1, 2, 3).css(), "rgb(1, 2, 3)");
    }
}
