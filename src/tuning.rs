//! Data-driven game balance
//!
//! All balance numbers live in one table so a rebalance is a config edit, not
//! a code fork. Structural constants (world size, pool capacities, entity
//! sizes) stay in [`crate::consts`]. Velocities are in units per millisecond
//! and times in milliseconds, matching the simulation's elapsed-time units.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Balance table for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player top speed per axis
    pub player_max_speed: f32,
    /// Exponential damping applied as `friction^elapsed_ms`
    pub player_friction: f32,
    /// Exponential-approach steering gain
    pub player_acceleration: f32,
    /// Cooldown between player shots (0 = one bullet per tick while held)
    pub player_fire_rate: f32,

    pub enemy_max_vx: f32,
    pub enemy_max_vy: f32,
    pub enemy_friction: f32,
    /// Steering gain for free-roam enemies
    pub enemy_acceleration: f32,
    /// Mean time between enemy shots
    pub enemy_fire_rate: f32,
    /// Uniform jitter width on the fire cooldown (`rate ± variance/2`)
    pub enemy_fire_rate_variance: f32,
    /// Width of the vertical-speed range rolled on each wall bounce
    /// (`max_vy ± jump/2`)
    pub enemy_vy_jump: f32,
    /// Probability a spawned enemy uses the free-roam chase pattern instead
    /// of the patrol zig-zag. 0.0 reproduces the classic spawn path.
    pub free_roam_chance: f32,

    /// Initial inter-arrival interval of the spawn scheduler
    pub spawn_interval_start: f32,
    /// Interval shrink per spawn (difficulty ramp, never floored)
    pub spawn_interval_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_max_speed: 2.0,
            player_friction: 0.995,
            player_acceleration: 0.005,
            player_fire_rate: 0.0,

            enemy_max_vx: 0.5,
            enemy_max_vy: 0.5,
            enemy_friction: 0.995,
            enemy_acceleration: 0.005,
            enemy_fire_rate: 1000.0,
            enemy_fire_rate_variance: 400.0,
            enemy_vy_jump: 0.5,
            free_roam_chance: 0.0,

            spawn_interval_start: 1000.0,
            spawn_interval_step: 10.0,
        }
    }
}

/// Failure loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Tuning {
    /// Load a tuning table from a JSON file. Missing fields fall back to the
    /// defaults, so a file may override only the numbers it cares about.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = serde_json::from_str(&json)?;
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_balance() {
        let t = Tuning::default();
        assert_eq!(t.player_max_speed, 2.0);
        assert_eq!(t.enemy_fire_rate, 1000.0);
        assert_eq!(t.spawn_interval_start, 1000.0);
        assert_eq!(t.free_roam_chance, 0.0);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"spawn_interval_step": 25.0}"#).unwrap();
        assert_eq!(t.spawn_interval_step, 25.0);
        assert_eq!(t.spawn_interval_start, 1000.0);
        assert_eq!(t.player_friction, 0.995);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Tuning::load("/nonexistent/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }

    #[test]
    fn test_roundtrip() {
        let mut t = Tuning::default();
        t.enemy_max_vx = 0.75;
        let json = serde_json::to_string(&t).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back.enemy_max_vx, 0.75);
    }
}
