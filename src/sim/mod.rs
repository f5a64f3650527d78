//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod color;
pub mod state;
pub mod step;
pub mod system;

pub use collision::{Contact, contact, resolve_collisions, resolve_pair};
pub use color::{Blend, PALETTE, Rgb, Rgba, blend_from, blend_random_color};
pub use state::{Body, Bounds, FrameInput, PointerState};
pub use step::{explode, update_bodies, update_body};
pub use system::{FrameStats, ParticleSystem, spawn_body};
