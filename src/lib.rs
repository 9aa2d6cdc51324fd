//! Chatballs - chat-driven bouncing entity simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, particles, eviction)
//! - `feed`: Inbound activity events and the cross-thread impulse queue
//! - `config`: Startup configuration
//! - `color`: RGB colour value

pub mod color;
pub mod config;
pub mod feed;
pub mod sim;

pub use color::Rgb;
pub use config::{ConfigError, SeedEntity, SimConfig};
pub use feed::{ActivityFeed, ChatMessage, ImpulseEvent, ImpulseSender};
pub use sim::{FrameSignal, SimEvent, Simulation, tick};

/// Default simulation constants
pub mod consts {
    /// Default world dimensions
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Entity defaults
    pub const ENTITY_RADIUS: f32 = 20.0;
    pub const MAX_SPEED: f32 = 100.0;
    /// Velocity multiplier per tick. 1.0 means no decay.
    pub const FRICTION: f32 = 1.0;
    pub const ACCELERATION: f32 = 1.0;

    /// Particle defaults
    pub const PARTICLE_LIFETIME: u32 = 60;
    pub const PARTICLE_SPEED: f32 = 1.5;
    pub const BURST_COUNT: usize = 10;

    /// One minute
    pub const INACTIVITY_TIMEOUT_MS: u64 = 60_000;

    /// Separation applied to each of two entities sharing the same centre
    pub const COINCIDENT_NUDGE: f32 = 0.5;
}
