//! Scene configuration
//!
//! Persisted as JSON in LocalStorage so a page can retune the animation without
//! a rebuild. Missing fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SceneError;

/// What happens to existing bodies when the container changes size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResizePolicy {
    /// Keep bodies where they are; the next frame's wall collision pulls them in
    #[default]
    Lazy,
    /// Confine bodies to the new bounds immediately
    Clamp,
    /// Throw away the batch and spawn a fresh one
    Reinit,
}

impl ResizePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizePolicy::Lazy => "lazy",
            ResizePolicy::Clamp => "clamp",
            ResizePolicy::Reinit => "reinit",
        }
    }
}

/// Tunables for one scene instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Bodies per batch
    pub count: usize,
    /// Global position multiplier
    pub speed_scale: f32,
    /// Per-frame velocity damping, in (0, 1]
    pub friction: f32,
    pub min_velocity: f32,
    pub max_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,

    // === Forces ===
    pub wall_margin: f32,
    pub wall_repulsion: f32,
    pub pointer_radius: f32,
    pub pointer_strength: f32,
    pub explode_force: f32,

    // === Spawn ===
    pub start_speed: f32,
    pub spawn_inset: f32,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    pub resize_policy: ResizePolicy,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            count: BODY_COUNT,
            speed_scale: SPEED_SCALE,
            friction: FRICTION,
            min_velocity: MIN_VELOCITY,
            max_speed: MAX_SPEED,
            radius_min: RADIUS_MIN,
            radius_max: RADIUS_MAX,

            wall_margin: WALL_MARGIN,
            wall_repulsion: WALL_REPULSION,
            pointer_radius: POINTER_RADIUS,
            pointer_strength: POINTER_STRENGTH,
            explode_force: EXPLODE_FORCE,

            start_speed: START_SPEED,
            spawn_inset: SPAWN_INSET,
            seed: None,

            resize_policy: ResizePolicy::Lazy,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Same config with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values the physics step cannot work with
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.count > MAX_BODIES {
            return Err(SceneError::InvalidConfig(format!(
                "count must be at most {}, got {}",
                MAX_BODIES, self.count
            )));
        }

        let fields = [
            ("speed_scale", self.speed_scale),
            ("friction", self.friction),
            ("min_velocity", self.min_velocity),
            ("max_speed", self.max_speed),
            ("radius_min", self.radius_min),
            ("radius_max", self.radius_max),
            ("wall_margin", self.wall_margin),
            ("wall_repulsion", self.wall_repulsion),
            ("pointer_radius", self.pointer_radius),
            ("pointer_strength", self.pointer_strength),
            ("explode_force", self.explode_force),
            ("start_speed", self.start_speed),
            ("spawn_inset", self.spawn_inset),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SceneError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.friction == 0.0 || self.friction > 1.0 {
            return Err(SceneError::InvalidConfig(format!(
                "friction must be in (0, 1], got {}",
                self.friction
            )));
        }
        if self.min_velocity > self.max_speed {
            return Err(SceneError::InvalidConfig(format!(
                "min_velocity {} exceeds max_speed {}",
                self.min_velocity, self.max_speed
            )));
        }
        if self.radius_min > self.radius_max {
            return Err(SceneError::InvalidConfig(format!(
                "radius_min {} exceeds radius_max {}",
                self.radius_min, self.radius_max
            )));
        }
        if self.pointer_radius == 0.0 {
            return Err(SceneError::InvalidConfig(
                "pointer_radius must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "kinetic_balls_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded scene config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored scene config: {}", e),
                }
            }
        }

        log::info!("Using default scene config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.count, 10);
        assert_eq!(config.resize_policy, ResizePolicy::Lazy);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SceneConfig::from_json(r#"{"count": 24, "resize_policy": "Clamp"}"#)
            .expect("valid config");
        assert_eq!(config.count, 24);
        assert_eq!(config.resize_policy, ResizePolicy::Clamp);
        assert_eq!(config.friction, FRICTION);
        assert_eq!(config.max_speed, MAX_SPEED);
    }

    #[test]
    fn test_json_round_trip_keeps_seed() {
        let config = SceneConfig::default().with_seed(7);
        let json = config.to_json().unwrap();
        assert_eq!(SceneConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_inverted_speed_band() {
        let result = SceneConfig::from_json(r#"{"min_velocity": 9.0, "max_speed": 8.0}"#);
        assert!(matches!(result, Err(SceneError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_friction() {
        for friction in [0.0, 1.5, -0.2] {
            let config = SceneConfig {
                friction,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "friction {} accepted", friction);
        }
    }

    #[test]
    fn test_rejects_inverted_radius_range() {
        let config = SceneConfig {
            radius_min: 30.0,
            radius_max: 10.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_count() {
        let result = SceneConfig::from_json(r#"{"count": 18446744073709551615}"#);
        assert!(matches!(result, Err(SceneError::InvalidConfig(_))));

        let config = SceneConfig {
            count: MAX_BODIES + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SceneConfig {
            count: MAX_BODIES,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = SceneConfig::from_json("{count: }");
        assert!(matches!(result, Err(SceneError::ConfigParse(_))));
    }
}
