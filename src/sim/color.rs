//! Body colors
//!
//! Each body gets a random blend of two distinct palette entries at spawn.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An opaque 8-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Shift every channel by `amount`, saturating at 0 and 255
    pub fn adjust(&self, amount: i16) -> Self {
        let shift = |c: u8| (c as i16 + amount).clamp(0, 255) as u8;
        Self::new(shift(self.r), shift(self.g), shift(self.b))
    }

    /// Channel-wise linear blend, rounded to the nearest integer
    pub fn lerp(&self, other: Rgb, t: f32) -> Self {
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t).round() as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// CSS `rgb(r,g,b)` form
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// A translucent color for outlines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            rgb: Rgb::new(r, g, b),
            alpha,
        }
    }
}

/// CSS `rgba(r,g,b,a)` form
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({},{},{},{})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

/// Brand palette: coral, amber, green
pub const PALETTE: [Rgb; 3] = [
    Rgb::new(245, 137, 129), // #f58981
    Rgb::new(255, 213, 79),  // #ffd54f
    Rgb::new(81, 187, 122),  // #51bb7a
];

/// One draw from the blender, with the indices it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend {
    pub first: usize,
    pub second: usize,
    pub mix: f32,
    pub color: Rgb,
}

/// Blend two distinct random palette entries by a random ratio.
///
/// The second index is redrawn until it differs from the first, so the palette
/// must hold at least two colors; a single-entry palette returns that entry.
pub fn blend_from<R: Rng + ?Sized>(palette: &[Rgb], rng: &mut R) -> Blend {
    match palette.len() {
        0 => Blend {
            first: 0,
            second: 0,
            mix: 0.0,
            color: Rgb::new(0, 0, 0),
        },
        1 => Blend {
            first: 0,
            second: 0,
            mix: 0.0,
            color: palette[0],
        },
        n => {
            let first = rng.random_range(0..n);
            let mut second = rng.random_range(0..n);
            while second == first {
                second = rng.random_range(0..n);
            }
            let mix: f32 = rng.random();
            Blend {
                first,
                second,
                mix,
                color: palette[first].lerp(palette[second], mix),
            }
        }
    }
}

/// Random blended color from the brand palette
pub fn blend_random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    blend_from(&PALETTE, rng).color
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_adjust_saturates() {
        let c = Rgb::new(245, 137, 10);
        assert_eq!(c.adjust(100), Rgb::new(255, 237, 110));
        assert_eq!(c.adjust(-50), Rgb::new(195, 87, 0));
        assert_eq!(c.adjust(0), c);
    }

    #[test]
    fn test_lerp_endpoints_and_rounding() {
        let a = Rgb::new(0, 100, 255);
        let b = Rgb::new(255, 101, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        // 127.5 rounds away from zero
        assert_eq!(a.lerp(b, 0.5).r, 128);
    }

    #[test]
    fn test_css_strings() {
        assert_eq!(Rgb::new(81, 187, 122).to_string(), "rgb(81,187,122)");
        assert_eq!(Rgba::new(0, 0, 0, 0.05).to_string(), "rgba(0,0,0,0.05)");
    }

    #[test]
    fn test_degenerate_palettes() {
        let mut rng = Pcg32::seed_from_u64(1);
        let only = Rgb::new(1, 2, 3);
        assert_eq!(blend_from(&[only], &mut rng).color, only);
        assert_eq!(blend_from(&[], &mut rng).color, Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_many_draws_use_distinct_indices() {
        let mut rng = Pcg32::seed_from_u64(2024);
        for _ in 0..10_000 {
            let blend = blend_from(&PALETTE, &mut rng);
            assert_ne!(blend.first, blend.second);
        }
    }

    proptest! {
        #[test]
        fn blended_channels_stay_between_sources(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let blend = blend_from(&PALETTE, &mut rng);
            prop_assert_ne!(blend.first, blend.second);
            prop_assert!((0.0..1.0).contains(&blend.mix));

            let c1 = PALETTE[blend.first].channels();
            let c2 = PALETTE[blend.second].channels();
            for (i, out) in blend.color.channels().into_iter().enumerate() {
                prop_assert!(out >= c1[i].min(c2[i]));
                prop_assert!(out <= c1[i].max(c2[i]));
            }
        }

        #[test]
        fn custom_palette_blend_is_bounded(
            a in any::<(u8, u8, u8)>(),
            b in any::<(u8, u8, u8)>(),
            seed in any::<u64>(),
        ) {
            let palette = [Rgb::new(a.0, a.1, a.2), Rgb::new(b.0, b.1, b.2)];
            let mut rng = Pcg32::seed_from_u64(seed);
            let blend = blend_from(&palette, &mut rng);
            prop_assert_ne!(blend.first, blend.second);
            let (lo, hi) = (a.0.min(b.0), a.0.max(b.0));
            prop_assert!(blend.color.r >= lo && blend.color.r <= hi);
        }
    }
}
