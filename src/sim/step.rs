//! Per-frame body update
//!
//! Advances each body through a fixed sequence of stages. The order matters for
//! how the animation looks, so `update_body` runs them exactly as listed:
//!
//! 1. soft wall repulsion
//! 2. position integration
//! 3. hard wall collision
//! 4. pointer repulsion
//! 5. friction
//! 6. speed floor/ceiling correction

use glam::Vec2;
use rand::Rng;

use super::state::{Body, Bounds, FrameInput, PointerState};
use crate::config::SceneConfig;
use crate::direction;

/// Push bodies near an edge back toward the interior
#[inline]
pub fn apply_wall_repulsion(body: &mut Body, bounds: Bounds, margin: f32, strength: f32) {
    if body.pos.x < margin {
        body.vel.x += strength;
    }
    if body.pos.x > bounds.width - margin {
        body.vel.x -= strength;
    }
    if body.pos.y < margin {
        body.vel.y += strength;
    }
    if body.pos.y > bounds.height - margin {
        body.vel.y -= strength;
    }
}

#[inline]
pub fn integrate(body: &mut Body, speed_scale: f32) {
    body.pos += body.vel * speed_scale;
}

/// Clamp to the walls and reflect the crossing velocity component (lossless)
pub fn collide_walls(body: &mut Body, bounds: Bounds) {
    let r = body.radius;

    if body.pos.x > bounds.width - r {
        body.pos.x = bounds.width - r;
        body.vel.x = -body.vel.x;
    } else if body.pos.x < r {
        body.pos.x = r;
        body.vel.x = -body.vel.x;
    }

    if body.pos.y > bounds.height - r {
        body.pos.y = bounds.height - r;
        body.vel.y = -body.vel.y;
    } else if body.pos.y < r {
        body.pos.y = r;
        body.vel.y = -body.vel.y;
    }
}

/// Move a body inside the bounds without touching its velocity
pub fn confine(body: &mut Body, bounds: Bounds) {
    let r = body.radius;
    if body.pos.x > bounds.width - r {
        body.pos.x = bounds.width - r;
    }
    if body.pos.x < r {
        body.pos.x = r;
    }
    if body.pos.y > bounds.height - r {
        body.pos.y = bounds.height - r;
    }
    if body.pos.y < r {
        body.pos.y = r;
    }
}

/// Radial push away from an active pointer, fading linearly to zero at `radius`.
///
/// A body sitting exactly on the pointer is pushed along +x at full strength.
pub fn apply_pointer_repulsion(body: &mut Body, pointer: &PointerState, radius: f32, strength: f32) {
    if !pointer.active {
        return;
    }

    let delta = body.pos - pointer.pos;
    let dist = delta.length();
    if dist >= radius {
        return;
    }

    let dir = if dist > 0.0 { delta / dist } else { Vec2::X };
    let falloff = (radius - dist) / radius;
    body.vel += dir * falloff * strength;
}

#[inline]
pub fn apply_friction(body: &mut Body, friction: f32) {
    body.vel *= friction;
}

/// Keep speed inside `[min, max]`.
///
/// Both thresholds are tested against the speed measured on entry. A body at
/// exact rest gets a small random kick instead of a rescale.
pub fn correct_speed<R: Rng + ?Sized>(body: &mut Body, min: f32, max: f32, rng: &mut R) {
    let speed = body.speed();

    if speed < min && speed > 0.0 {
        body.vel *= min / speed;
    } else if speed == 0.0 {
        body.vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
    }

    if speed > max {
        body.vel *= max / speed;
    }
}

/// Run all six stages on one body
pub fn update_body<R: Rng + ?Sized>(
    body: &mut Body,
    bounds: Bounds,
    input: &FrameInput,
    config: &SceneConfig,
    rng: &mut R,
) {
    apply_wall_repulsion(body, bounds, config.wall_margin, config.wall_repulsion);
    integrate(body, config.speed_scale);
    collide_walls(body, bounds);
    apply_pointer_repulsion(
        body,
        &input.pointer,
        config.pointer_radius,
        config.pointer_strength,
    );
    apply_friction(body, config.friction);
    correct_speed(body, config.min_velocity, config.max_speed, rng);
}

/// Update every body in order
pub fn update_bodies<R: Rng + ?Sized>(
    bodies: &mut [Body],
    bounds: Bounds,
    input: &FrameInput,
    config: &SceneConfig,
    rng: &mut R,
) {
    for body in bodies.iter_mut() {
        update_body(body, bounds, input, config, rng);
    }
}

/// Overwrite every velocity with `force` in a fresh random direction
pub fn explode<R: Rng + ?Sized>(bodies: &mut [Body], force: f32, rng: &mut R) {
    for body in bodies.iter_mut() {
        let theta = rng.random::<f32>() * std::f32::consts::TAU;
        body.vel = direction(theta) * force;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::color::PALETTE;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn body_at(x: f32, y: f32, vx: f32, vy: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(vx, vy), 15.0, PALETTE[0])
    }

    #[test]
    fn test_wall_repulsion_only_inside_margin() {
        let bounds = Bounds::new(400.0, 400.0);

        let mut centered = body_at(200.0, 200.0, 0.0, 0.0);
        apply_wall_repulsion(&mut centered, bounds, 50.0, 0.2);
        assert_eq!(centered.vel, Vec2::ZERO);

        let mut corner = body_at(10.0, 395.0, 0.0, 0.0);
        apply_wall_repulsion(&mut corner, bounds, 50.0, 0.2);
        assert!((corner.vel.x - 0.2).abs() < 1e-6);
        assert!((corner.vel.y + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_wall_collision_reflects_without_loss() {
        let bounds = Bounds::new(400.0, 300.0);
        let mut body = body_at(395.0, 5.0, 3.0, -2.0);
        collide_walls(&mut body, bounds);

        assert_eq!(body.pos, Vec2::new(385.0, 15.0));
        assert_eq!(body.vel, Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_pointer_inactive_applies_no_force() {
        let mut body = body_at(100.0, 100.0, 1.0, 0.0);
        let mut pointer = PointerState::at(101.0, 100.0);
        pointer.leave();
        apply_pointer_repulsion(&mut body, &pointer, 180.0, 1.5);
        assert_eq!(body.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_pointer_force_scales_linearly() {
        let pointer = PointerState::at(0.0, 100.0);

        // Half the interaction radius away: half strength, pointing away
        let mut body = body_at(90.0, 100.0, 0.0, 0.0);
        apply_pointer_repulsion(&mut body, &pointer, 180.0, 1.5);
        assert!((body.vel.x - 0.75).abs() < 1e-6);
        assert!(body.vel.y.abs() < 1e-6);

        // At the radius: nothing
        let mut edge = body_at(180.0, 100.0, 0.0, 0.0);
        apply_pointer_repulsion(&mut edge, &pointer, 180.0, 1.5);
        assert_eq!(edge.vel, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_on_center_pushes_along_x() {
        let mut body = body_at(50.0, 60.0, 0.0, 0.0);
        let pointer = PointerState::at(50.0, 60.0);
        apply_pointer_repulsion(&mut body, &pointer, 180.0, 1.5);
        assert_eq!(body.vel, Vec2::new(1.5, 0.0));
    }

    #[test]
    fn test_speed_floor_preserves_direction() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut body = body_at(0.0, 0.0, 0.3, 0.4);
        correct_speed(&mut body, 1.5, 8.0, &mut rng);
        assert!((body.speed() - 1.5).abs() < 1e-5);
        assert!((body.vel.x / body.vel.y - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_speed_ceiling() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut body = body_at(0.0, 0.0, 30.0, 40.0);
        correct_speed(&mut body, 1.5, 8.0, &mut rng);
        assert!((body.speed() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_speed_gets_small_kick() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut body = body_at(0.0, 0.0, 0.0, 0.0);
        correct_speed(&mut body, 1.5, 8.0, &mut rng);
        assert!(body.vel != Vec2::ZERO);
        assert!(body.vel.x.abs() <= 0.5 && body.vel.y.abs() <= 0.5);
        assert!(body.vel.is_finite());
    }

    #[test]
    fn test_friction_drains_energy_in_open_space() {
        let config = SceneConfig::default();
        let bounds = Bounds::new(2000.0, 2000.0);
        let input = FrameInput::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut body = body_at(1000.0, 1000.0, 7.0, 0.0);

        let mut last = body.speed();
        for _ in 0..50 {
            update_body(&mut body, bounds, &input, &config, &mut rng);
            let speed = body.speed();
            assert!(speed < last);
            assert!((speed - last * config.friction).abs() < 1e-4);
            last = speed;
        }
    }

    #[test]
    fn test_explode_overwrites_velocity() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut bodies = vec![body_at(10.0, 10.0, 100.0, 100.0); 5];
        explode(&mut bodies, 10.0, &mut rng);
        for body in &bodies {
            assert!((body.speed() - 10.0).abs() < 1e-4);
        }
        assert!(bodies.windows(2).any(|w| w[0].vel != w[1].vel));
    }

    proptest! {
        #[test]
        fn speed_band_holds_after_update(
            x in 0.0f32..400.0,
            y in 0.0f32..400.0,
            vx in -40.0f32..40.0,
            vy in -40.0f32..40.0,
            px in 0.0f32..400.0,
            py in 0.0f32..400.0,
            active in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let config = SceneConfig::default();
            let bounds = Bounds::new(400.0, 400.0);
            let input = FrameInput {
                pointer: PointerState { pos: Vec2::new(px, py), active },
                ..Default::default()
            };
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut body = body_at(x, y, vx, vy);
            update_body(&mut body, bounds, &input, &config, &mut rng);

            let speed = body.speed();
            prop_assume!(speed > 0.8);
            prop_assert!(speed >= config.min_velocity - 1e-4);
            prop_assert!(speed <= config.max_speed + 1e-4);
            prop_assert!(body.is_inside(bounds, 1e-3));
        }
    }
}
