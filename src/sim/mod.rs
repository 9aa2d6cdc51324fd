//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - One step per frame signal, no internal timer
//! - Seeded RNG only
//! - Stable iteration order (entity creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod events;
pub mod particle;
pub mod registry;
pub mod state;
pub mod tick;

pub use collision::{Contact, resolve_collisions};
pub use entity::{Bounce, Entity};
pub use events::SimEvent;
pub use particle::{Particle, ParticleSystem};
pub use registry::EntityRegistry;
pub use state::{Simulation, World};
pub use tick::{FrameSignal, TickSummary, tick};
