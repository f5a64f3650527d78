//! Kinetic Balls - a small 2D physics toy for a canvas background
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, forces, collisions, color blending)
//! - `renderer`: 2D drawing surface abstraction and themed gradients
//! - `host`: Scene lifecycle (mount, input, frame loop, teardown)
//! - `scheduler`: Frame scheduling abstraction
//! - `platform`: Browser bindings
//! - `config`: Data-driven tunables

pub mod config;
pub mod error;
pub mod host;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod sim;
pub mod theme;

pub use config::{ResizePolicy, SceneConfig};
pub use error::SceneError;
pub use host::{BoundingBox, Container, Detach, SceneHost};
pub use scheduler::{FrameHandle, ManualScheduler, Scheduler};
pub use theme::{Theme, ThemeCell, ThemeSource};

use glam::Vec2;

/// Default simulation tunables
pub mod consts {
    /// Number of bodies spawned per scene
    pub const BODY_COUNT: usize = 10;
    /// Largest batch a config may ask for; pair resolution is quadratic
    pub const MAX_BODIES: usize = 1000;
    /// Global position integration multiplier
    pub const SPEED_SCALE: f32 = 0.8;
    /// Per-frame velocity damping
    pub const FRICTION: f32 = 0.995;
    /// Speed floor (pixels/frame)
    pub const MIN_VELOCITY: f32 = 1.5;
    /// Speed ceiling (pixels/frame)
    pub const MAX_SPEED: f32 = 8.0;

    /// Body radius range
    pub const RADIUS_MIN: f32 = 10.0;
    pub const RADIUS_MAX: f32 = 22.0;

    /// Distance from an edge where the soft push starts
    pub const WALL_MARGIN: f32 = 50.0;
    /// Soft push added to velocity per frame inside the margin
    pub const WALL_REPULSION: f32 = 0.2;

    /// Pointer interaction radius (pixels)
    pub const POINTER_RADIUS: f32 = 180.0;
    /// Pointer push coefficient at zero distance
    pub const POINTER_STRENGTH: f32 = 1.5;
    /// Pointer position while no pointer has been seen
    pub const POINTER_PARKED: f32 = -1000.0;

    /// Click impulse magnitude
    pub const EXPLODE_FORCE: f32 = 10.0;
    /// Initial body speed
    pub const START_SPEED: f32 = 5.0;
    /// Spawn keeps this far from each edge
    pub const SPAWN_INSET: f32 = 50.0;
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Total kinetic energy of a set of velocities, treating every body as unit mass
#[inline]
pub fn kinetic_energy<'a>(velocities: impl IntoIterator<Item = &'a Vec2>) -> f32 {
    velocities
        .into_iter()
        .map(|v| 0.5 * v.length_squared())
        .sum()
}
