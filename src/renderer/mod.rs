//! 2D rendering module
//!
//! The scene draws through [`Surface2d`], a minimal slice of the canvas 2D API.
//! The browser backend lives in `canvas`; `recording` captures draw calls for
//! tests and headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod shading;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCall, RecordingSurface};
pub use shading::{ColorStop, RadialGradient, ShadedDisc, gradient_stops, outline_color, shade_body};

use crate::sim::ParticleSystem;
use crate::theme::Theme;

/// A pixel surface the scene can draw discs on
pub trait Surface2d {
    /// Match the backing store to the container, pixel for pixel
    fn resize(&mut self, width: u32, height: u32);
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);
    /// Fill and outline one disc
    fn draw_disc(&mut self, disc: &ShadedDisc);
}

/// Draw one frame. The theme is passed in per call, never cached.
pub fn render<S: Surface2d + ?Sized>(system: &ParticleSystem, theme: Theme, surface: &mut S) {
    surface.clear(system.bounds.width, system.bounds.height);
    for body in &system.bodies {
        surface.draw_disc(&shade_body(body, theme));
    }
}
