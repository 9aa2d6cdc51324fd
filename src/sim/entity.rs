//! Per-participant kinematic state
//!
//! One entity exists per distinct activity source. Entities drift with their
//! velocity, bounce off the world bounds and pick up random impulses whenever
//! their source is active.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::World;
use crate::color::Rgb;

/// Which axes hit a boundary during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

impl Bounce {
    pub fn any(&self) -> bool {
        self.x || self.y
    }

    /// Number of boundary hits (a corner counts twice)
    pub fn count(&self) -> usize {
        self.x as usize + self.y as usize
    }
}

/// A simulated participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Creation order, used for stable iteration
    pub id: u32,
    pub name: String,
    pub color: Rgb,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Monotonic timestamp (ms) of the last impulse
    pub last_active: u64,
}

impl Entity {
    pub fn new(id: u32, name: impl Into<String>, color: Rgb, pos: Vec2, now: u64) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            pos,
            vel: Vec2::ZERO,
            last_active: now,
        }
    }

    /// Add an impulse in a uniformly random direction, then cap the speed
    pub fn accelerate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        magnitude: f32,
        max_speed: f32,
        now: u64,
    ) {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        self.vel += Vec2::new(angle.cos(), angle.sin()) * magnitude;
        self.vel = self.vel.clamp_length_max(max_speed);
        self.last_active = now;
    }

    /// Apply friction, integrate one tick and bounce off the world bounds.
    ///
    /// Each axis is handled independently so a corner hit reports both.
    pub fn update(&mut self, world: &World) -> Bounce {
        let config = &world.config;
        self.vel *= config.friction;
        // Collisions exchange velocity components and may leave a pair over the cap
        self.vel = self.vel.clamp_length_max(config.max_speed);
        self.pos += self.vel;

        let min = world.min_pos();
        let max = world.max_pos();
        let mut bounce = Bounce::default();

        if self.pos.x < min.x {
            self.pos.x = min.x;
            self.vel.x = -self.vel.x;
            bounce.x = true;
        } else if self.pos.x > max.x {
            self.pos.x = max.x;
            self.vel.x = -self.vel.x;
            bounce.x = true;
        }

        if self.pos.y < min.y {
            self.pos.y = min.y;
            self.vel.y = -self.vel.y;
            bounce.y = true;
        } else if self.pos.y > max.y {
            self.pos.y = max.y;
            self.vel.y = -self.vel.y;
            bounce.y = true;
        }

        bounce
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
