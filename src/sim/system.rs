//! The body batch and its frame loop

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::resolve_collisions;
use super::color::blend_random_color;
use super::state::{Body, Bounds, FrameInput};
use super::step::{confine, explode, update_bodies};
use crate::config::SceneConfig;
use crate::consts::MAX_BODIES;
use crate::direction;

/// Per-frame statistics, handy for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub contacts: usize,
    pub kinetic_energy: f32,
}

/// A fixed-size batch of bodies plus everything needed to advance it
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub bodies: Vec<Body>,
    pub bounds: Bounds,
    pub config: SceneConfig,
    rng: Pcg32,
    /// Frames advanced since the last `init`
    pub frame: u64,
}

impl ParticleSystem {
    /// Empty system; call [`ParticleSystem::init`] once bounds are known
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        Self {
            bodies: Vec::new(),
            bounds: Bounds::default(),
            config,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
        }
    }

    /// Replace the batch with `config.count` fresh bodies (at most `MAX_BODIES`)
    pub fn init(&mut self) {
        let count = self.config.count.min(MAX_BODIES);
        if count < self.config.count {
            log::warn!(
                "Body count {} capped to {}",
                self.config.count,
                MAX_BODIES
            );
        }
        self.bodies.clear();
        for _ in 0..count {
            let body = spawn_body(&self.config, self.bounds, &mut self.rng);
            self.bodies.push(body);
        }
        self.frame = 0;
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Pull every body inside the current bounds
    pub fn confine_all(&mut self) {
        for body in self.bodies.iter_mut() {
            confine(body, self.bounds);
        }
    }

    /// One simulation frame: per-body update, then pair resolution
    pub fn advance(&mut self, input: &FrameInput) -> FrameStats {
        update_bodies(
            &mut self.bodies,
            self.bounds,
            input,
            &self.config,
            &mut self.rng,
        );
        let contacts = resolve_collisions(&mut self.bodies, self.bounds);
        self.frame += 1;

        FrameStats {
            contacts,
            kinetic_energy: self.kinetic_energy(),
        }
    }

    /// Random-direction impulse on every body
    pub fn explode(&mut self) {
        explode(&mut self.bodies, self.config.explode_force, &mut self.rng);
    }

    pub fn kinetic_energy(&self) -> f32 {
        crate::kinetic_energy(self.bodies.iter().map(|b| &b.vel))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Spawn one body somewhere inside the spawn inset, moving at `start_speed`
pub fn spawn_body<R: Rng + ?Sized>(config: &SceneConfig, bounds: Bounds, rng: &mut R) -> Body {
    let radius = config.radius_min + rng.random::<f32>() * (config.radius_max - config.radius_min);
    let inset = config.spawn_inset;
    let pos = Vec2::new(
        rng.random::<f32>() * (bounds.width - 2.0 * inset) + inset,
        rng.random::<f32>() * (bounds.height - 2.0 * inset) + inset,
    );
    let theta = rng.random::<f32>() * std::f32::consts::TAU;
    let vel = direction(theta) * config.start_speed;

    Body::new(pos, vel, radius, blend_random_color(rng))
}
