// crates/tagflow-render/src/primitives.rs

/// Color utilities. Colors are linear RGBA in `[0, 1]`.
pub mod color {
    use glam::Vec4;

    pub const TRANSPARENT: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

    pub fn from_hex(hex: u32) -> Vec4 {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Vec4::new(r, g, b, a)
    }

    /// Scales the alpha channel, leaving RGB alone.
    pub fn with_opacity(color: Vec4, opacity: f32) -> Vec4 {
        Vec4::new(color.x, color.y, color.z, color.w * opacity.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::color;
    use glam::Vec4;

    #[test]
    fn from_hex_reads_rgba_order() {
        assert_eq!(color::from_hex(0xFF0000FF), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(color::from_hex(0x00000000), color::TRANSPARENT);
    }

    #[test]
    fn with_opacity_clamps() {
        assert_eq!(color::with_opacity(color::WHITE, 0.5).w, 0.5);
        assert_eq!(color::with_opacity(color::WHITE, 3.0).w, 1.0);
    }
}
