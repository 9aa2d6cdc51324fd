//! Simulation configuration
//!
//! Every tunable constant lives here and can be overridden at startup from a
//! JSON file. Missing fields fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::consts::*;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// An entity created when the simulation starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedEntity {
    pub name: String,
    #[serde(default)]
    pub color: Option<Rgb>,
    /// Number of accelerate calls applied right after creation
    #[serde(default)]
    pub impulses: u32,
}

/// Startup configuration for the whole simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Initial world width
    pub width: f32,
    /// Initial world height
    pub height: f32,
    /// Entity radius
    pub radius: f32,
    /// Speed cap applied after every impulse and integration step
    pub max_speed: f32,
    /// Per-tick velocity multiplier (1.0 = no decay)
    pub friction: f32,
    /// Magnitude of a single impulse
    pub acceleration: f32,
    /// Particle lifetime in ticks
    pub particle_lifetime: u32,
    /// Half-range of the per-axis particle velocity
    pub particle_speed: f32,
    /// Particles per burst
    pub burst_count: usize,
    /// Entities idle for longer than this are evicted
    pub inactivity_timeout_ms: u64,
    /// Seed for the simulation RNG
    pub rng_seed: u64,
    pub seeds: Vec<SeedEntity>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            radius: ENTITY_RADIUS,
            max_speed: MAX_SPEED,
            friction: FRICTION,
            acceleration: ACCELERATION,
            particle_lifetime: PARTICLE_LIFETIME,
            particle_speed: PARTICLE_SPEED,
            burst_count: BURST_COUNT,
            inactivity_timeout_ms: INACTIVITY_TIMEOUT_MS,
            rng_seed: 0,
            seeds: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("width", self.width),
            ("height", self.height),
            ("radius", self.radius),
            ("max_speed", self.max_speed),
            ("friction", self.friction),
            ("acceleration", self.acceleration),
            ("particle_speed", self.particle_speed),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite")));
        }
        if self.radius <= 0.0 {
            return Err(ConfigError::Invalid("radius must be > 0".into()));
        }
        if self.max_speed <= 0.0 {
            return Err(ConfigError::Invalid("max_speed must be > 0".into()));
        }
        if self.friction <= 0.0 || self.friction > 1.0 {
            return Err(ConfigError::Invalid("friction must be in (0, 1]".into()));
        }
        if self.acceleration < 0.0 {
            return Err(ConfigError::Invalid("acceleration must be >= 0".into()));
        }
        if self.particle_lifetime == 0 {
            return Err(ConfigError::Invalid("particle_lifetime must be >= 1".into()));
        }
        if self.particle_speed < 0.0 {
            return Err(ConfigError::Invalid("particle_speed must be >= 0".into()));
        }
        // Spawn ranges span twice these values and must stay finite
        let magnitudes = [
            ("radius", self.radius),
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("particle_speed", self.particle_speed),
        ];
        if let Some((name, _)) = magnitudes.iter().find(|(_, v)| !(v * 2.0).is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} is too large")));
        }
        let diameter = self.radius * 2.0;
        if self.width < diameter || self.height < diameter {
            return Err(ConfigError::Invalid(format!(
                "radius {} does not fit in a {}x{} world",
                self.radius, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Replace every unusable value with its default (or nearest usable value).
    ///
    /// Used for configs built in code that never went through [`Self::validate`].
    /// World size is left to the bounds clamp.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let usable = |v: f32| v.is_finite() && (v * 2.0).is_finite();

        if !usable(self.radius) || self.radius <= 0.0 {
            log::warn!("radius {} unusable, using {}", self.radius, defaults.radius);
            self.radius = defaults.radius;
        }
        if !usable(self.max_speed) || self.max_speed <= 0.0 {
            log::warn!("max_speed {} unusable, using {}", self.max_speed, defaults.max_speed);
            self.max_speed = defaults.max_speed;
        }
        if !self.friction.is_finite() || self.friction <= 0.0 || self.friction > 1.0 {
            log::warn!("friction {} unusable, using {}", self.friction, defaults.friction);
            self.friction = defaults.friction;
        }
        if !usable(self.acceleration) || self.acceleration < 0.0 {
            log::warn!(
                "acceleration {} unusable, using {}",
                self.acceleration,
                defaults.acceleration
            );
            self.acceleration = defaults.acceleration;
        }
        if !usable(self.particle_speed) {
            log::warn!(
                "particle_speed {} unusable, using {}",
                self.particle_speed,
                defaults.particle_speed
            );
            self.particle_speed = defaults.particle_speed;
        } else if self.particle_speed < 0.0 {
            log::warn!("particle_speed {} clamped to 0", self.particle_speed);
            self.particle_speed = 0.0;
        }
        if self.particle_lifetime == 0 {
            log::warn!("particle_lifetime 0 clamped to 1");
            self.particle_lifetime = 1;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.friction, 1.0);
        assert_eq!(config.burst_count, 10);
        assert_eq!(config.particle_lifetime, 60);
        assert_eq!(config.inactivity_timeout_ms, 60_000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "radius": 12.5, "rng_seed": 42 }"#).unwrap();
        assert_eq!(config.radius, 12.5);
        assert_eq!(config.rng_seed, 42);
        assert_eq!(config.max_speed, MAX_SPEED);
        assert!(config.seeds.is_empty());
    }

    #[test]
    fn test_seed_entities_parse() {
        let json = r#"{ "seeds": [ { "name": "host", "color": 16711680, "impulses": 10 } ] }"#;
        let config = SimConfig::from_json(json).unwrap();
        assert_eq!(
            config.seeds,
            vec![SeedEntity {
                name: "host".into(),
                color: Some(Rgb::RED),
                impulses: 10,
            }]
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SimConfig::from_json(r#"{ "radius": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("radius"));

        let err = SimConfig::from_json(r#"{ "friction": 1.5 }"#).unwrap_err();
        assert!(err.to_string().contains("friction"));

        let err = SimConfig::from_json(r#"{ "particle_lifetime": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("particle_lifetime"));
    }

    #[test]
    fn test_rejects_magnitudes_that_overflow_when_doubled() {
        let err = SimConfig::from_json(r#"{ "particle_speed": 2e38 }"#).unwrap_err();
        assert!(err.to_string().contains("particle_speed"));

        let err = SimConfig::from_json(r#"{ "radius": 2e38, "width": 3e38, "height": 3e38 }"#)
            .unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn test_rejects_radius_larger_than_world() {
        let err = SimConfig::from_json(r#"{ "radius": 400 }"#).unwrap_err();
        assert!(err.to_string().contains("does not fit"));
        assert!(SimConfig::from_json(r#"{ "radius": 360 }"#).is_ok());
    }

    #[test]
    fn test_sanitized_replaces_unusable_values() {
        let config = SimConfig {
            radius: f32::NAN,
            max_speed: -3.0,
            friction: 2.0,
            acceleration: f32::INFINITY,
            particle_speed: -1.0,
            particle_lifetime: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.radius, ENTITY_RADIUS);
        assert_eq!(config.max_speed, MAX_SPEED);
        assert_eq!(config.friction, FRICTION);
        assert_eq!(config.acceleration, ACCELERATION);
        assert_eq!(config.particle_speed, 0.0);
        assert_eq!(config.particle_lifetime, 1);

        let config = SimConfig {
            particle_speed: 2e38,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.particle_speed, PARTICLE_SPEED);
        assert_eq!(SimConfig::default().sanitized(), SimConfig::default());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = SimConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
