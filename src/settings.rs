//! Game settings
//!
//! JSON on disk, every field optional (missing fields take defaults).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How neighbor sets are computed each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NeighborIndex {
    /// Check every pair
    #[default]
    BruteForce,
    /// Uniform grid, same results
    Grid,
}

impl NeighborIndex {
    pub fn as_str(&self) -> &'static str {
        match self {
            NeighborIndex::BruteForce => "brute_force",
            NeighborIndex::Grid => "grid",
        }
    }
}

/// What a second kill inside an open panic window does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PanicOverlap {
    /// The latest kill restarts the full window; older expiry timers are stale
    #[default]
    Restart,
    /// Every kill schedules its own expiry and the first one to fire calms the swarm
    FirstExpiryClears,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(&'static str),
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Swarm spawn seed
    pub seed: u64,
    pub swarm_size: usize,
    /// Multiplier on cooldowns and projectile flight time
    pub speed_scale: f32,

    // === World (headless driver only; a host reports its own bounds) ===
    pub world_width: f32,
    pub world_height: f32,

    // === Simulation ===
    pub neighbor_index: NeighborIndex,
    pub panic_overlap: PanicOverlap,

    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            swarm_size: SWARM_SIZE,
            speed_scale: 1.0,

            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,

            neighbor_index: NeighborIndex::BruteForce,
            panic_overlap: PanicOverlap::Restart,

            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !(self.speed_scale.is_finite() && self.speed_scale > 0.0) {
            return Err(SettingsError::Invalid("speed_scale must be positive"));
        }
        if !(self.world_width.is_finite() && self.world_width > 0.0)
            || !(self.world_height.is_finite() && self.world_height > 0.0)
        {
            return Err(SettingsError::Invalid("world size must be positive"));
        }
        if !(0.0..=1.0).contains(&self.sfx_volume) {
            return Err(SettingsError::Invalid("sfx_volume must be within 0..=1"));
        }
        Ok(())
    }
}
