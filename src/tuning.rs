//! Data-driven game balance
//!
//! Every timing and size knob of a session. Defaults come from `consts`;
//! a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning or message data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("message list is empty, a session needs at least one heart to catch")]
    NoMessages,
}

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Cadence ===
    /// Seconds between spawns
    pub spawn_interval_secs: f32,
    /// Delay between the winning catch and the final screen
    pub final_delay_secs: f32,

    // === Spawning ===
    pub spawn_margin: f32,
    pub spawn_y: f32,
    pub heart_size_min: f32,
    pub heart_size_max: f32,

    // === Falling ===
    pub fall_duration_min_secs: f32,
    pub fall_duration_max_secs: f32,
    pub fall_start_delay_secs: f32,
    pub fall_overshoot: f32,
    pub scale_in_secs: f32,
    pub sway_min: f32,
    pub sway_max: f32,
    pub rotation_min_deg: f32,
    pub rotation_max_deg: f32,

    // === Basket ===
    pub basket_width: f32,
    pub basket_height: f32,

    // === Effects ===
    pub capture_secs: f32,
    pub toast_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            final_delay_secs: FINAL_DELAY_SECS,

            spawn_margin: SPAWN_MARGIN,
            spawn_y: SPAWN_Y,
            heart_size_min: HEART_SIZE_MIN,
            heart_size_max: HEART_SIZE_MAX,

            fall_duration_min_secs: FALL_DURATION_MIN_SECS,
            fall_duration_max_secs: FALL_DURATION_MAX_SECS,
            fall_start_delay_secs: FALL_START_DELAY_SECS,
            fall_overshoot: FALL_OVERSHOOT,
            scale_in_secs: SCALE_IN_SECS,
            sway_min: SWAY_MIN,
            sway_max: SWAY_MAX,
            rotation_min_deg: ROTATION_MIN_DEG,
            rotation_max_deg: ROTATION_MAX_DEG,

            basket_width: BASKET_WIDTH,
            basket_height: BASKET_HEIGHT,

            capture_secs: CAPTURE_SECS,
            toast_secs: TOAST_SECS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the scheduler or spawner cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("spawn_interval_secs", self.spawn_interval_secs)?;
        positive("fall_duration_min_secs", self.fall_duration_min_secs)?;
        positive("basket_width", self.basket_width)?;
        positive("basket_height", self.basket_height)?;
        positive("heart_size_min", self.heart_size_min)?;
        non_negative("final_delay_secs", self.final_delay_secs)?;
        non_negative("fall_start_delay_secs", self.fall_start_delay_secs)?;
        non_negative("fall_overshoot", self.fall_overshoot)?;
        non_negative("scale_in_secs", self.scale_in_secs)?;
        non_negative("spawn_margin", self.spawn_margin)?;
        non_negative("sway_min", self.sway_min)?;
        non_negative("rotation_min_deg", self.rotation_min_deg)?;
        non_negative("capture_secs", self.capture_secs)?;
        non_negative("toast_secs", self.toast_secs)?;
        ordered("heart_size", self.heart_size_min, self.heart_size_max)?;
        ordered(
            "fall_duration_secs",
            self.fall_duration_min_secs,
            self.fall_duration_max_secs,
        )?;
        ordered("sway", self.sway_min, self.sway_max)?;
        ordered("rotation_deg", self.rotation_min_deg, self.rotation_max_deg)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be > 0, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be >= 0, got {value}"),
        })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max && max.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("min {min} exceeds max {max}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_interval_secs": 0.5 }"#).unwrap();
        assert_eq!(tuning.spawn_interval_secs, 0.5);
        assert_eq!(tuning.basket_width, BASKET_WIDTH);
        assert_eq!(tuning.final_delay_secs, FINAL_DELAY_SECS);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Tuning::from_json(r#"{ "spawn_interval_secs": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "spawn_interval_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err =
            Tuning::from_json(r#"{ "heart_size_min": 80.0, "heart_size_max": 40.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "heart_size", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ spawn_interval_secs: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut tuning = Tuning::default();
        tuning.toast_secs = 1.25;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
