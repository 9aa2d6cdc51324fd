//! One discrete simulation step per frame signal
//!
//! The simulation owns no timer. The rendering side calls [`tick`] once per
//! frame with its own monotonic timestamp, and each call advances exactly one
//! step: drain queued impulses, integrate, collide, evict, age particles.
//!
//! Entities are inside `[radius, bound - radius]` right after integration.
//! Collision push-apart runs later and may leave an entity slightly past a
//! wall until the next tick's update clamps it back.

use super::collision::resolve_collisions;
use super::events::SimEvent;
use super::state::Simulation;

/// Delivered by the renderer once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSignal {
    /// Monotonic timestamp in milliseconds
    pub now: u64,
}

impl FrameSignal {
    pub fn new(now: u64) -> Self {
        Self { now }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    /// Impulses applied from the queue before the step
    pub impulses: usize,
    /// Boundary hits (a corner counts twice)
    pub bounces: usize,
    /// Entity pairs that collided
    pub contacts: usize,
    /// Names evicted for inactivity
    pub evicted: Vec<String>,
    pub particles_expired: usize,
}

/// Advance the simulation by one step
pub fn tick(sim: &mut Simulation, frame: FrameSignal) -> TickSummary {
    let now = frame.now;
    let mut summary = TickSummary {
        impulses: sim.drain_pending(now),
        ..Default::default()
    };

    sim.time_ticks += 1;

    let Simulation {
        world,
        rng,
        registry,
        particles,
        events,
        ..
    } = sim;
    let burst = world.config.burst_count;

    // Integrate and bounce off the bounds
    for entity in registry.as_mut_slice() {
        let bounce = entity.update(world);
        for _ in 0..bounce.count() {
            particles.spawn(rng, entity.pos, entity.color, burst, events);
        }
        summary.bounces += bounce.count();
    }

    // Pairwise collisions over the whole set
    let contacts = resolve_collisions(registry.as_mut_slice(), world.radius());
    let entities = registry.as_slice();
    for contact in &contacts {
        particles.spawn(rng, contact.pos_a, entities[contact.a].color, burst, events);
        particles.spawn(rng, contact.pos_b, entities[contact.b].color, burst, events);
    }
    summary.contacts = contacts.len();

    summary.evicted = registry
        .evict_inactive(now, world.config.inactivity_timeout_ms, events)
        .into_iter()
        .map(|e| e.name)
        .collect();

    for entity in registry.iter() {
        events.push(SimEvent::EntityMoved {
            name: entity.name.clone(),
            position: entity.pos,
        });
    }

    summary.particles_expired = particles.step(events);

    log::trace!(
        "Tick {}: {} entities, {} particles, {} contacts",
        sim.time_ticks,
        sim.registry.len(),
        sim.particles.len(),
        summary.contacts
    );
    summary
}
