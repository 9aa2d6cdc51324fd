//! Name-keyed ownership of every live entity

use glam::Vec2;
use rand::Rng;

use super::entity::Entity;
use super::events::SimEvent;
use super::state::World;
use crate::color::Rgb;

/// Owns all entities, kept in creation order for deterministic iteration
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Fetch `name`, creating it at a random in-bounds position if unseen.
    ///
    /// Blank names are rejected with `None`. An existing entity is returned
    /// untouched; `color_hint` only matters on creation, and a missing hint
    /// draws a random colour.
    pub fn get_or_create<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        color_hint: Option<Rgb>,
        world: &World,
        now: u64,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) -> Option<&mut Entity> {
        let name = name.trim();
        if name.is_empty() {
            log::debug!("Ignoring blank entity name");
            return None;
        }

        if let Some(idx) = self.index_of(name) {
            return Some(&mut self.entities[idx]);
        }

        let min = world.min_pos();
        let max = world.max_pos();
        let pos = Vec2::new(
            rng.random_range(min.x..=max.x),
            rng.random_range(min.y..=max.y),
        );
        let color = color_hint.unwrap_or_else(|| Rgb::random(rng));

        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let entity = Entity::new(id, name, color, pos, now);
        log::info!("Entity '{}' created ({}) at ({:.1}, {:.1})", name, color, pos.x, pos.y);
        events.push(SimEvent::EntityCreated {
            name: entity.name.clone(),
            color,
            position: pos,
        });
        self.entities.push(entity);
        self.entities.last_mut()
    }

    /// Create-or-fetch `name`, then give it a random impulse.
    ///
    /// Returns false when the name was rejected.
    pub fn apply_impulse<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        color_hint: Option<Rgb>,
        world: &World,
        now: u64,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        let Some(entity) = self.get_or_create(name, color_hint, world, now, rng, events) else {
            return false;
        };
        entity.accelerate(rng, world.config.acceleration, world.config.max_speed, now);
        entity.last_active = now;
        log::debug!(
            "Impulse on '{}', speed now {:.2}",
            entity.name,
            entity.speed()
        );
        true
    }

    /// Remove and return every entity idle for longer than `timeout_ms`
    pub fn evict_inactive(
        &mut self,
        now: u64,
        timeout_ms: u64,
        events: &mut Vec<SimEvent>,
    ) -> Vec<Entity> {
        if !self
            .entities
            .iter()
            .any(|e| now.saturating_sub(e.last_active) > timeout_ms)
        {
            return Vec::new();
        }

        let (evicted, kept): (Vec<Entity>, Vec<Entity>) = std::mem::take(&mut self.entities)
            .into_iter()
            .partition(|e| now.saturating_sub(e.last_active) > timeout_ms);
        self.entities = kept;

        for entity in &evicted {
            log::info!("Entity '{}' evicted after inactivity", entity.name);
            events.push(SimEvent::EntityRemoved {
                name: entity.name.clone(),
            });
        }
        evicted
    }

    /// Remove `name` immediately. Absent names are a no-op.
    pub fn remove(&mut self, name: &str, events: &mut Vec<SimEvent>) -> Option<Entity> {
        let idx = self.index_of(name.trim())?;
        let entity = self.entities.remove(idx);
        events.push(SimEvent::EntityRemoved {
            name: entity.name.clone(),
        });
        Some(entity)
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.index_of(name.trim()).map(|idx| &self.entities[idx])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.index_of(name.trim()).map(|idx| &mut self.entities[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name.trim()).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn as_mut_slice(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.entities.iter().position(|e| e.name == name)
    }
}
