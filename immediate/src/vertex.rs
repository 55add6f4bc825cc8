use glam::Vec3;
use lumen_graphics::Color;

/// A line vertex: position + packed RGBA8 color.
///
/// Matches [`VertexLayout::position_color`](lumen_graphics::mesh::VertexLayout::position_color):
/// three little-endian `f32`s at offsets 0, 4 and 8, then the color bytes
/// at 12..16. Every pair of consecutive vertices forms one line segment.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<LineVertex>(), 16);

impl LineVertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: u32 = std::mem::size_of::<Self>() as u32;

    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_unorm8(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_layout() {
        let v = LineVertex::new(Vec3::new(1.0, -2.0, 0.5), Color::new(1.0, 0.5, 0.0, 1.0));
        let bytes = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 16);
        if cfg!(target_endian = "little") {
            assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
            assert_eq!(&bytes[4..8], &(-2.0f32).to_le_bytes());
            assert_eq!(&bytes[8..12], &0.5f32.to_le_bytes());
        }
        // 0.5 * 255 = 127.5, truncated
        assert_eq!(&bytes[12..16], &[255, 127, 0, 255]);
    }

    #[test]
    fn test_color_is_clamped() {
        let v = LineVertex::new(Vec3::ZERO, Color::new(2.0, -1.0, 0.999, 0.0));
        assert_eq!(v.color, [255, 0, 254, 0]);
    }

    #[test]
    fn test_position_roundtrip() {
        let p = Vec3::new(3.25, 0.0, -7.5);
        assert_eq!(LineVertex::new(p, Color::WHITE).position(), p);
    }
}
