//! Simulation state types
//!
//! Plain data records; all behavior lives in free functions over slices.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use crate::consts::POINTER_PARKED;
use crate::theme::Theme;

/// A simulated ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed at spawn
    pub radius: f32,
    /// Fixed at spawn
    pub color: Rgb,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Rgb) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// True if the whole disc lies inside the bounds (with a small tolerance)
    pub fn is_inside(&self, bounds: Bounds, tolerance: f32) -> bool {
        self.pos.x >= self.radius - tolerance
            && self.pos.x <= bounds.width - self.radius + tolerance
            && self.pos.y >= self.radius - tolerance
            && self.pos.y <= bounds.height - self.radius + tolerance
    }
}

/// Drawing surface extent in pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Last known pointer location relative to the container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub pos: Vec2,
    /// Position is ignored while inactive
    pub active: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            pos: Vec2::splat(POINTER_PARKED),
            active: false,
        }
    }
}

impl PointerState {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            active: true,
        }
    }

    /// Pointer left the container; the stale position is kept
    pub fn leave(&mut self) {
        self.active = false;
    }
}

/// Everything from outside the simulation that one frame needs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub pointer: PointerState,
    pub theme: Theme,
}
