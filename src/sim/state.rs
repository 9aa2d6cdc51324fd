//! World bounds and the simulation-owning state
//!
//! Everything mutable lives in [`Simulation`]: the entity registry, the
//! particle system, the seeded RNG, the inbound impulse queue and the
//! outbound event buffer. Nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::Entity;
use super::events::SimEvent;
use super::particle::ParticleSystem;
use super::registry::EntityRegistry;
use crate::color::Rgb;
use crate::config::SimConfig;
use crate::feed::{ActivityFeed, ImpulseEvent, ImpulseSender};

/// Resizable bounds plus the simulation constants
#[derive(Debug, Clone)]
pub struct World {
    /// Current width and height
    pub size: Vec2,
    pub config: SimConfig,
}

impl World {
    pub fn new(config: SimConfig) -> Self {
        let mut world = Self {
            size: Vec2::ZERO,
            config,
        };
        world.set_bounds(world.config.width, world.config.height);
        world
    }

    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    /// Lowest valid entity centre
    pub fn min_pos(&self) -> Vec2 {
        Vec2::splat(self.config.radius)
    }

    /// Highest valid entity centre
    pub fn max_pos(&self) -> Vec2 {
        self.size - self.config.radius
    }

    /// Resize, clamping each axis to at least one entity diameter.
    ///
    /// Existing positions are left alone; entities re-clamp on their next update.
    pub fn set_bounds(&mut self, width: f32, height: f32) -> Vec2 {
        let min = self.config.radius * 2.0;
        let clamp = |v: f32| if v.is_finite() && v >= min { v } else { min };
        let size = Vec2::new(clamp(width), clamp(height));
        if size != Vec2::new(width, height) {
            log::warn!(
                "World bounds {}x{} clamped to {}x{}",
                width,
                height,
                size.x,
                size.y
            );
        }
        self.size = size;
        size
    }
}

/// Complete simulation state (deterministic given seed and input order)
#[derive(Debug)]
pub struct Simulation {
    pub(crate) world: World,
    pub(crate) rng: Pcg32,
    pub(crate) registry: EntityRegistry,
    pub(crate) particles: ParticleSystem,
    pub(crate) feed: ActivityFeed,
    pub(crate) events: Vec<SimEvent>,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
}

impl Simulation {
    /// Create a simulation and apply the configured seed entities at `now`.
    ///
    /// Unusable config values are replaced (see [`SimConfig::sanitized`]).
    pub fn new(config: SimConfig, now: u64) -> Self {
        let config = config.sanitized();
        let rng = Pcg32::seed_from_u64(config.rng_seed);
        let particles = ParticleSystem::new(config.particle_lifetime, config.particle_speed);
        let mut sim = Self {
            world: World::new(config),
            rng,
            registry: EntityRegistry::new(),
            particles,
            feed: ActivityFeed::new(),
            events: Vec::new(),
            time_ticks: 0,
        };

        let seeds = sim.world.config.seeds.clone();
        for seed in &seeds {
            sim.seed_entity(&seed.name, seed.color, seed.impulses, now);
        }

        log::info!(
            "Simulation created: {}x{} world, seed {}, {} seeded entities",
            sim.world.size.x,
            sim.world.size.y,
            sim.world.config.rng_seed,
            sim.registry.len()
        );
        sim
    }

    /// Create (or fetch) `name` and give it `impulses` accelerate calls
    pub fn seed_entity(&mut self, name: &str, color: Option<Rgb>, impulses: u32, now: u64) {
        let Some(entity) = self.registry.get_or_create(
            name,
            color,
            &self.world,
            now,
            &mut self.rng,
            &mut self.events,
        ) else {
            return;
        };
        let config = &self.world.config;
        for _ in 0..impulses {
            entity.accelerate(&mut self.rng, config.acceleration, config.max_speed, now);
        }
    }

    /// Apply one activity event right away. Blank names are ignored.
    pub fn apply_impulse(&mut self, event: &ImpulseEvent, now: u64) {
        self.registry.apply_impulse(
            &event.name,
            event.color_hint,
            &self.world,
            now,
            &mut self.rng,
            &mut self.events,
        );
    }

    /// A handle for producers on other threads; events are applied at the start of the next tick
    pub fn impulse_sender(&self) -> ImpulseSender {
        self.feed.sender()
    }

    /// Apply every queued impulse. Returns how many were drained.
    pub fn drain_pending(&mut self, now: u64) -> usize {
        let pending = self.feed.drain();
        for event in &pending {
            self.apply_impulse(event, now);
        }
        pending.len()
    }

    pub fn set_world_bounds(&mut self, width: f32, height: f32) {
        let size = self.world.set_bounds(width, height);
        log::info!("World resized to {}x{}", size.x, size.y);
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.registry.get(name)
    }

    /// Direct access for drivers that reposition entities (drag, teleport)
    pub fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.registry.get_mut(name)
    }

    pub fn entities(&self) -> &[Entity] {
        self.registry.as_slice()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}
