//! Outbound state-change events
//!
//! The simulation never touches presentation state. A rendering collaborator
//! drains these after each tick and mirrors them onto its own scene.

use glam::Vec2;
use serde::Serialize;

use crate::color::Rgb;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    EntityCreated { name: String, color: Rgb, position: Vec2 },
    EntityMoved { name: String, position: Vec2 },
    EntityRemoved { name: String },
    ParticleSpawned { id: u32, position: Vec2, color: Rgb },
    ParticleMoved { id: u32, position: Vec2, alpha: f32 },
    ParticleRemoved { id: u32 },
}
