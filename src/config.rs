use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse pendulum config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid pendulum config: `{field}` {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Tunables for one hanging badge.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides (e.g. `{"damping": 0.98, "elastic_rope": false}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumConfig {
    /// Gravity in px/s².
    pub gravity: f64,
    /// Velocity multiplier applied once per frame.
    pub damping: f64,
    pub max_angle_deg: f64,
    /// Velocity kept (and reversed) when the swing hits the travel limit.
    pub restitution: f64,
    /// Upper bound for the integration step, in seconds.
    pub max_dt: f64,

    pub initial_angle: f64,
    pub rope_length: f64,
    pub rope_min: f64,
    pub rope_max: f64,

    pub drag_enabled: bool,
    /// Let the rope stretch to the pointer while dragging.
    pub elastic_rope: bool,

    pub scroll_gain: f64,
    pub scroll_max: f64,

    pub wind: WindConfig,
    pub render: RenderConfig,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            gravity: 1400.0,
            damping: 0.995,
            max_angle_deg: 55.0,
            restitution: 0.75,
            max_dt: 0.032,
            initial_angle: 0.25,
            rope_length: 160.0,
            rope_min: 90.0,
            rope_max: 260.0,
            drag_enabled: true,
            elastic_rope: true,
            scroll_gain: 0.004,
            scroll_max: 0.8,
            wind: WindConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Amplitude of the value-noise breeze.
    pub strength: f64,
    /// Noise phase advance per second.
    pub phase_rate: f64,
    /// Per-frame probability of starting a gust.
    pub gust_chance: f64,
    pub gust_strength: f64,
    pub gust_decay: f64,
    pub torque_scale: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            strength: 0.9,
            phase_rate: 0.35,
            gust_chance: 0.01,
            gust_strength: 1.5,
            gust_decay: 0.98,
            torque_scale: 0.06,
        }
    }
}

impl WindConfig {
    pub fn calm() -> Self {
        Self {
            strength: 0.0,
            gust_strength: 0.0,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Max card tilt around X in degrees; Y gets 1.5x this.
    pub parallax: f64,
    pub stretch_coefficient: f64,
    pub stretch_cap: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parallax: 8.0,
            stretch_coefficient: 0.055,
            stretch_cap: 0.18,
        }
    }
}

impl PendulumConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn max_angle(&self) -> f64 {
        self.max_angle_deg.to_radians()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !(self.gravity > 0.0) {
            return invalid("gravity", "must be positive");
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return invalid("damping", "must be in (0, 1]");
        }
        if !(self.max_angle_deg > 0.0 && self.max_angle_deg < 180.0) {
            return invalid("max_angle_deg", "must be in (0, 180)");
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return invalid("restitution", "must be in [0, 1]");
        }
        if !(self.max_dt > 0.0) {
            return invalid("max_dt", "must be positive");
        }
        if !(self.rope_min > 0.0) {
            return invalid("rope_min", "must be positive");
        }
        if !(self.rope_min <= self.rope_max) {
            return invalid("rope_max", "must not be below rope_min");
        }
        if !(self.rope_min..=self.rope_max).contains(&self.rope_length) {
            return invalid("rope_length", "must lie within [rope_min, rope_max]");
        }
        if !(0.0..=1.0).contains(&self.wind.gust_chance) {
            return invalid("wind.gust_chance", "must be in [0, 1]");
        }
        if !self.scroll_max.is_finite() || self.scroll_max < 0.0 {
            return invalid("scroll_max", "must be a non-negative number");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        PendulumConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PendulumConfig::from_json(r#"{"damping": 0.98, "wind": {"strength": 0.2}}"#).unwrap();
        assert_eq!(config.damping, 0.98);
        assert_eq!(config.wind.strength, 0.2);
        assert_eq!(config.wind.gust_strength, 1.5);
        assert_eq!(config.rope_length, 160.0);
        assert!(config.elastic_rope);
    }

    #[test]
    fn serialized_config_loads_back() {
        let config = PendulumConfig {
            damping: 0.98,
            elastic_rope: false,
            wind: WindConfig::calm(),
            ..PendulumConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let loaded = PendulumConfig::from_json(&json).unwrap();
        approx::assert_relative_eq!(loaded.damping, 0.98);
        approx::assert_relative_eq!(loaded.rope_length, config.rope_length);
        assert!(!loaded.elastic_rope);
        assert_eq!(loaded.wind.strength, 0.0);
        assert_eq!(loaded.wind.gust_strength, 0.0);
    }

    #[test]
    fn rejects_out_of_range_damping() {
        let err = PendulumConfig::from_json(r#"{"damping": 1.2}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "damping", .. }));
    }

    #[test]
    fn rejects_rope_outside_bounds() {
        let err = PendulumConfig::from_json(r#"{"rope_length": 300}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "rope_length", .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PendulumConfig::from_json("{damping: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn calm_wind_has_no_forcing() {
        let wind = WindConfig::calm();
        assert_eq!(wind.strength, 0.0);
        assert_eq!(wind.gust_strength, 0.0);
    }
}
