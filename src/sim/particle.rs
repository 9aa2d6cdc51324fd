//! Decorative particle bursts
//!
//! Particles are purely visual: they never interact with entities or each
//! other. Each one drifts with a small random velocity and fades out over a
//! fixed number of ticks.

use glam::Vec2;
use rand::Rng;

use super::events::SimEvent;
use crate::color::Rgb;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Inherited from the emitting entity
    pub color: Rgb,
    /// Ticks left before removal
    pub remaining: u32,
    /// `remaining / initial lifetime`
    pub alpha: f32,
}

/// Owns and ages every live particle
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    lifetime: u32,
    speed: f32,
    next_id: u32,
}

impl ParticleSystem {
    /// `lifetime` is clamped to at least one tick
    pub fn new(lifetime: u32, speed: f32) -> Self {
        Self {
            particles: Vec::new(),
            lifetime: lifetime.max(1),
            speed,
            next_id: 1,
        }
    }

    /// Emit `count` particles at `pos`, each with an independent random velocity
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        color: Rgb,
        count: usize,
        events: &mut Vec<SimEvent>,
    ) {
        self.particles.reserve(count);
        for _ in 0..count {
            let id = self.next_id;
            self.next_id = self.next_id.wrapping_add(1);
            let vel = Vec2::new(
                rng.random_range(-self.speed..=self.speed),
                rng.random_range(-self.speed..=self.speed),
            );
            self.particles.push(Particle {
                id,
                pos,
                vel,
                color,
                remaining: self.lifetime,
                alpha: 1.0,
            });
            events.push(SimEvent::ParticleSpawned { id, position: pos, color });
        }
        log::trace!("Burst of {} particles at ({:.1}, {:.1})", count, pos.x, pos.y);
    }

    /// Age every particle by one tick, dropping the ones that expire.
    ///
    /// Returns the number of particles removed.
    pub fn step(&mut self, events: &mut Vec<SimEvent>) -> usize {
        let before = self.particles.len();
        let lifetime = self.lifetime as f32;

        self.particles.retain_mut(|p| {
            p.pos += p.vel;
            p.remaining = p.remaining.saturating_sub(1);
            p.alpha = p.remaining as f32 / lifetime;
            if p.remaining == 0 {
                events.push(SimEvent::ParticleRemoved { id: p.id });
                false
            } else {
                events.push(SimEvent::ParticleMoved {
                    id: p.id,
                    position: p.pos,
                    alpha: p.alpha,
                });
                true
            }
        });

        before - self.particles.len()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}
