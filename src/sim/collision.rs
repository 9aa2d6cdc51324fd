//! Pairwise collision detection and response between entities
//!
//! All entities are equal-mass discs of the same radius. Overlapping pairs
//! exchange the velocity components along their line of centres (a perfectly
//! elastic collision) and are pushed apart until they just touch.
//!
//! Pairs are resolved one at a time in `i < j` order over the slice. When three
//! or more entities overlap in the same tick, later pairs see the positions
//! left by earlier ones; the pass is not a simultaneous solve.

use glam::Vec2;

use super::entity::Entity;
use crate::consts::COINCIDENT_NUDGE;

/// A resolved overlap between two entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the first entity in the resolved slice
    pub a: usize,
    /// Index of the second entity (always greater than `a`)
    pub b: usize,
    /// Positions right after separation, where the bursts belong
    pub pos_a: Vec2,
    pub pos_b: Vec2,
}

/// Resolve every overlapping pair in `entities`.
///
/// Returns the contacts in resolution order. Coincident centres are pulled
/// apart along the x axis without exchanging velocity and produce no contact.
pub fn resolve_collisions(entities: &mut [Entity], radius: f32) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let min_dist = radius * 2.0;

    for i in 0..entities.len() {
        let (head, tail) = entities.split_at_mut(i + 1);
        let a = &mut head[i];
        for (k, b) in tail.iter_mut().enumerate() {
            if let Some((pos_a, pos_b)) = resolve_pair(a, b, min_dist) {
                contacts.push(Contact { a: i, b: i + 1 + k, pos_a, pos_b });
            }
        }
    }

    contacts
}

/// Resolve a single pair, returning their post-separation positions on contact
fn resolve_pair(a: &mut Entity, b: &mut Entity, min_dist: f32) -> Option<(Vec2, Vec2)> {
    let delta = a.pos - b.pos;
    let dist = delta.length();

    if dist >= min_dist {
        return None;
    }

    if dist == 0.0 {
        log::warn!(
            "Entities '{}' and '{}' share a centre at ({:.1}, {:.1}), nudging apart",
            a.name,
            b.name,
            a.pos.x,
            a.pos.y
        );
        a.pos.x += COINCIDENT_NUDGE;
        b.pos.x -= COINCIDENT_NUDGE;
        return None;
    }

    // Rotate both velocities into the frame whose x axis is the line of centres
    let theta = delta.y.atan2(delta.x);
    let to_world = Vec2::from_angle(theta);
    let to_local = Vec2::new(to_world.x, -to_world.y);
    let va = a.vel.rotate(to_local);
    let vb = b.vel.rotate(to_local);

    // Equal masses: swap normal components, keep tangential ones
    a.vel = Vec2::new(vb.x, va.y).rotate(to_world);
    b.vel = Vec2::new(va.x, vb.y).rotate(to_world);

    let push = delta / dist * ((min_dist - dist) / 2.0);
    a.pos += push;
    b.pos -= push;

    Some((a.pos, b.pos))
}
