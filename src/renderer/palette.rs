//! Colors

use bytemuck::{Pod, Zeroable};

use crate::consts::MAX_HITPOINTS;

/// 8-bit RGBA pixel, laid out as it sits in the framebuffer
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque color from `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 0xFF,
        }
    }

    /// Move each channel `factor` of the way toward white
    pub fn lighter(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let up = |c: u8| (f64::from(c) + (255.0 - f64::from(c)) * f).round() as u8;
        Self {
            r: up(self.r),
            g: up(self.g),
            b: up(self.b),
            a: self.a,
        }
    }

    /// Move each channel `factor` of the way toward black
    pub fn darker(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let down = |c: u8| (f64::from(c) * (1.0 - f)).round() as u8;
        Self {
            r: down(self.r),
            g: down(self.g),
            b: down(self.b),
            a: self.a,
        }
    }
}

pub const BACKGROUND: Rgba = Rgba::hex(0x1E1E1E);
pub const BALL: Rgba = Rgba::hex(0xCCFFFF);
pub const PLATFORM: Rgba = Rgba::hex(0xBFBFBF);
pub const WALL: Rgba = Rgba::hex(0xBF8040);
pub const INDESTRUCTIBLE_BRICK: Rgba = Rgba::hex(0xFF0000);

/// One tier per hitpoint, weakest first
pub const BRICK_TIERS: [Rgba; MAX_HITPOINTS as usize] = [
    Rgba::hex(0xFDEF42),
    Rgba::hex(0x99FF00),
    Rgba::hex(0x007E56),
    Rgba::hex(0x005A7E),
    Rgba::hex(0x463ACB),
    Rgba::hex(0xF40BEC),
    Rgba::hex(0xA44EFE),
    Rgba::hex(0xFF7B00),
    Rgba::hex(0xF44611),
];

/// Color of a live brick with `hitpoints` left
///
/// Panics outside 1..=MAX_HITPOINTS; destroyed bricks are never drawn.
pub fn brick_color(hitpoints: u32) -> Rgba {
    assert!(
        (1..=MAX_HITPOINTS).contains(&hitpoints),
        "no brick color for {hitpoints} hitpoints"
    );
    BRICK_TIERS[hitpoints as usize - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(
            Rgba::hex(0xBF8040),
            Rgba {
                r: 0xBF,
                g: 0x80,
                b: 0x40,
                a: 0xFF
            }
        );
    }

    #[test]
    fn test_lighter_darker() {
        let c = Rgba::hex(0x804000);
        assert_eq!(c.lighter(0.0), c);
        assert_eq!(c.lighter(1.0), Rgba::hex(0xFFFFFF));
        assert_eq!(c.darker(1.0), Rgba::hex(0x000000));
        assert_eq!(c.darker(0.5), Rgba::hex(0x402000));
    }

    #[test]
    fn test_brick_tiers() {
        assert_eq!(brick_color(1), Rgba::hex(0xFDEF42));
        assert_eq!(brick_color(9), Rgba::hex(0xF44611));
    }

    #[test]
    #[should_panic]
    fn test_brick_color_rejects_zero() {
        brick_color(0);
    }
}
