//! RGB colors handed to the renderer

use serde::{Deserialize, Serialize};

/// Linear RGB color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Default cube color
    pub const ORANGE: Self = Self::new(1.0, 0.5, 0.2);
    /// Default sphere color
    pub const GREEN: Self = Self::new(0.2, 0.8, 0.2);
    /// Default cylinder color
    pub const BLUE: Self = Self::new(0.2, 0.5, 1.0);
    /// Default letter color
    pub const RED: Self = Self::new(0.9, 0.2, 0.2);
    /// Pure white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a color from its channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, ready for a uniform upload
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// True when every channel lies in `[0, 1]`
    pub fn is_normalized(self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_normalized() {
        for color in [Color::ORANGE, Color::GREEN, Color::BLUE, Color::RED, Color::WHITE] {
            assert!(color.is_normalized());
        }
        assert!(!Color::new(1.5, 0.0, 0.0).is_normalized());
        assert!(!Color::new(0.0, f32::NAN, 0.0).is_normalized());
    }

    #[test]
    fn test_array_conversion() {
        let color = Color::from([0.1, 0.2, 0.3]);
        assert_eq!(color.to_array(), [0.1, 0.2, 0.3]);
    }
}
