//! Linear RGBA color.

/// An RGBA color with floating point channels in `0.0..=1.0`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);

    /// Create a color from all four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Pack into four normalized 8-bit channels, RGBA order.
    ///
    /// Each channel is clamped to `0.0..=1.0`, scaled by 255 and truncated.
    pub fn to_unorm8(self) -> [u8; 4] {
        [
            unorm8(self.r),
            unorm8(self.g),
            unorm8(self.b),
            unorm8(self.a),
        ]
    }
}

fn unorm8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0) as u8
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unorm8_packing() {
        assert_eq!(Color::WHITE.to_unorm8(), [255, 255, 255, 255]);
        assert_eq!(Color::new(0.5, 0.0, 1.0, 0.25).to_unorm8(), [127, 0, 255, 63]);
    }

    #[test]
    fn test_unorm8_clamps() {
        assert_eq!(Color::new(2.0, -1.0, 0.0, 1.5).to_unorm8(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_array_conversion() {
        let c = Color::from([0.1, 0.2, 0.3, 0.4]);
        let back: [f32; 4] = c.into();
        assert_eq!(back, [0.1, 0.2, 0.3, 0.4]);
    }
}
