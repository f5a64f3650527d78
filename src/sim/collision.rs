//! Body-body collision response
//!
//! Every unordered pair is checked once per frame. That is O(n²), which is fine
//! for the few dozen bodies a background animation uses.

use glam::Vec2;

use super::state::{Body, Bounds};
use super::step::confine;

/// Result of a pair overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first body's center toward the second's
    pub normal: Vec2,
    /// How far the discs interpenetrate
    pub overlap: f32,
}

/// Check whether two bodies overlap.
///
/// Coincident centers report a +x normal so the response stays finite.
pub fn contact(a: &Body, b: &Body) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;

    if dist >= min_dist {
        return None;
    }

    let normal = if dist > 0.0 { delta / dist } else { Vec2::X };
    Some(Contact {
        normal,
        overlap: min_dist - dist,
    })
}

/// Separate two overlapping bodies and swap their normal velocity components.
///
/// Each body moves half the overlap along the normal. The velocity exchange is
/// the equal-mass elastic response projected on the normal; tangential motion is
/// left alone.
pub fn resolve_pair(a: &mut Body, b: &mut Body, contact: Contact) {
    let shift = contact.normal * (contact.overlap / 2.0);
    a.pos -= shift;
    b.pos += shift;

    let dot = (a.vel - b.vel).dot(contact.normal);
    a.vel -= contact.normal * dot;
    b.vel += contact.normal * dot;
}

/// Pull a separated pair back inside the bounds without closing the gap again.
///
/// Whatever a wall takes off one body is added to the other, so the pair moves
/// as a unit. Only a container too small for both discs leaves them overlapping.
pub fn confine_pair(a: &mut Body, b: &mut Body, bounds: Bounds) {
    for _ in 0..2 {
        let before = b.pos;
        confine(b, bounds);
        a.pos += b.pos - before;

        let before = a.pos;
        confine(a, bounds);
        b.pos += a.pos - before;
    }
    confine(b, bounds);
}

/// Resolve every overlapping pair, then confine positions to the bounds.
///
/// Returns the number of contacts handled.
pub fn resolve_collisions(bodies: &mut [Body], bounds: Bounds) -> usize {
    let mut contacts = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if let Some(hit) = contact(a, b) {
                resolve_pair(a, b, hit);
                confine_pair(a, b, bounds);
                contacts += 1;
            }
        }
    }

    for body in bodies.iter_mut() {
        confine(body, bounds);
    }
    contacts
}
