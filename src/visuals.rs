//! Color helpers and the default look.
//!
//! Colors are RGB triples in 0.0-1.0, stored as [`Vec3`] like everything else
//! that touches the renderer.

use glam::Vec3;

/// Convert a `0xRRGGBB` hex value to an RGB color.
///
/// # Example
///
/// ```
/// use plexus::visuals::rgb;
///
/// let lavender = rgb(0xbb86fc);
/// assert!((lavender.x - 187.0 / 255.0).abs() < 1e-6);
/// ```
pub const fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Default particle palette: three purple hues.
pub const DEFAULT_PALETTE: [Vec3; 3] = [rgb(0xbb86fc), rgb(0x6200ea), rgb(0x3700b3)];

/// Default connection line color (the lightest palette hue).
pub const DEFAULT_CONNECTION_COLOR: Vec3 = rgb(0xbb86fc);

/// Default background clear color (near-black).
pub const DEFAULT_BACKGROUND: Vec3 = rgb(0x0a0a0a);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_channels() {
        let c = rgb(0x6200ea);
        assert!((c.x - 98.0 / 255.0).abs() < 1e-6);
        assert!(c.y.abs() < 1e-6);
        assert!((c.z - 234.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_rgb_extremes() {
        assert_eq!(rgb(0x000000), Vec3::ZERO);
        assert_eq!(rgb(0xffffff), Vec3::ONE);
    }

    #[test]
    fn test_default_palette_in_unit_range() {
        for color in DEFAULT_PALETTE {
            assert!(color.min_element() >= 0.0);
            assert!(color.max_element() <= 1.0);
        }
    }
}
