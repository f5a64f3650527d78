//! Themed radial shading for bodies
//!
//! The light source sits up and to the left of each disc. Dark theme fades
//! bright center → base color → darker edge; light theme goes bright center →
//! lighter tint → near-white ring → lighter tint again, which reads as a glow.

use glam::Vec2;

use crate::sim::{Body, Rgb, Rgba};
use crate::theme::Theme;

/// Offset of the highlight from the disc center, as a fraction of the radius
const HIGHLIGHT_OFFSET: f32 = 0.3;
/// Radius of the highlight circle, as a fraction of the radius
const HIGHLIGHT_RADIUS: f32 = 0.1;

/// One gradient stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient, 0..=1
    pub offset: f32,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgb) -> Self {
        Self { offset, color }
    }
}

/// Two-circle radial gradient, canvas style
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
}

/// Everything needed to draw one body
#[derive(Debug, Clone, PartialEq)]
pub struct ShadedDisc {
    pub center: Vec2,
    pub radius: f32,
    pub fill: RadialGradient,
    pub outline: Rgba,
    pub line_width: f32,
}

/// Gradient stops for a base color under a theme
pub fn gradient_stops(base: Rgb, theme: Theme) -> Vec<ColorStop> {
    match theme {
        Theme::Light => vec![
            ColorStop::new(0.0, base.adjust(100)),
            ColorStop::new(0.2, base.adjust(50)),
            ColorStop::new(0.6, base.adjust(10)),
            ColorStop::new(1.0, base.adjust(50)),
        ],
        Theme::Dark => vec![
            ColorStop::new(0.0, base.adjust(100)),
            ColorStop::new(0.3, base),
            ColorStop::new(1.0, base.adjust(-50)),
        ],
    }
}

/// Faint outline that separates overlapping discs
pub fn outline_color(theme: Theme) -> Rgba {
    match theme {
        Theme::Light => Rgba::new(0, 0, 0, 0.05),
        Theme::Dark => Rgba::new(255, 255, 255, 0.05),
    }
}

/// Build the draw description for one body
pub fn shade_body(body: &Body, theme: Theme) -> ShadedDisc {
    let r = body.radius;
    ShadedDisc {
        center: body.pos,
        radius: r,
        fill: RadialGradient {
            inner_center: body.pos - Vec2::splat(r * HIGHLIGHT_OFFSET),
            inner_radius: r * HIGHLIGHT_RADIUS,
            outer_center: body.pos,
            outer_radius: r,
            stops: gradient_stops(body.color, theme),
        },
        outline: outline_color(theme),
        line_width: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma(c: Rgb) -> u32 {
        c.r as u32 + c.g as u32 + c.b as u32
    }

    #[test]
    fn test_dark_theme_darkens_toward_edge() {
        let base = Rgb::new(81, 187, 122);
        let stops = gradient_stops(base, Theme::Dark);
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[1].color, base);
        assert!(stops.windows(2).all(|w| luma(w[0].color) >= luma(w[1].color)));
        assert!(stops.windows(2).all(|w| w[0].offset < w[1].offset));
    }

    #[test]
    fn test_light_theme_glow_is_not_monotonic() {
        let base = Rgb::new(81, 187, 122);
        let stops = gradient_stops(base, Theme::Light);
        assert_eq!(stops.len(), 4);
        // Dims toward the ring at 0.6, then brightens again at the edge
        assert!(luma(stops[2].color) < luma(stops[1].color));
        assert!(luma(stops[3].color) > luma(stops[2].color));
        assert_eq!(stops[0].offset, 0.0);
        assert_eq!(stops[3].offset, 1.0);
    }

    #[test]
    fn test_shade_body_geometry() {
        let body = Body::new(Vec2::new(100.0, 50.0), Vec2::ZERO, 20.0, Rgb::new(1, 2, 3));
        let disc = shade_body(&body, Theme::Dark);
        assert_eq!(disc.center, body.pos);
        assert_eq!(disc.fill.inner_center, Vec2::new(94.0, 44.0));
        assert!((disc.fill.inner_radius - 2.0).abs() < 1e-6);
        assert_eq!(disc.fill.outer_radius, 20.0);
        assert_eq!(disc.outline, Rgba::new(255, 255, 255, 0.05));
    }
}
