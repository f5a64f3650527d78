//! Headless surface that records draw calls

use super::{ShadedDisc, Surface2d};

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize { width: u32, height: u32 },
    Clear { width: f32, height: f32 },
    Disc(ShadedDisc),
}

/// Keeps every call since the last [`RecordingSurface::take`]
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    /// Current backing-store size
    pub size: (u32, u32),
    /// Number of `clear` calls so far (one per drawn frame)
    pub frames: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded calls
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Discs drawn since the most recent clear
    pub fn last_frame(&self) -> Vec<&ShadedDisc> {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::Clear { .. }))
            .map(|i| i + 1)
            .unwrap_or(0);
        self.calls[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCall::Disc(disc) => Some(disc),
                _ => None,
            })
            .collect()
    }
}

impl Surface2d for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.calls.push(DrawCall::Resize { width, height });
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.frames += 1;
        self.calls.push(DrawCall::Clear { width, height });
    }

    fn draw_disc(&mut self, disc: &ShadedDisc) {
        self.calls.push(DrawCall::Disc(disc.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::renderer::render;
    use crate::sim::{Bounds, ParticleSystem};
    use crate::theme::Theme;

    #[test]
    fn test_render_clears_then_draws_every_body() {
        let mut system = ParticleSystem::new(SceneConfig::default(), 3);
        system.set_bounds(Bounds::new(300.0, 200.0));
        system.init();

        let mut surface = RecordingSurface::new();
        render(&system, Theme::Dark, &mut surface);

        let calls = surface.take();
        assert_eq!(calls.len(), system.len() + 1);
        assert_eq!(
            calls[0],
            DrawCall::Clear {
                width: 300.0,
                height: 200.0
            }
        );
    }

    #[test]
    fn test_last_frame_only_sees_latest_discs() {
        let mut system = ParticleSystem::new(SceneConfig::default(), 4);
        system.set_bounds(Bounds::new(300.0, 300.0));
        system.init();

        let mut surface = RecordingSurface::new();
        render(&system, Theme::Dark, &mut surface);
        render(&system, Theme::Light, &mut surface);

        assert_eq!(surface.frames, 2);
        let discs = surface.last_frame();
        assert_eq!(discs.len(), system.len());
        assert!(discs.iter().all(|d| d.fill.stops.len() == 4));
    }
}
