//! Runtime settings
//!
//! Separate from `Tuning`: these control how the simulation is driven and
//! how much visual debris it keeps, not the gameplay balance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, TICK_HZ};
use crate::error::{ConfigError, read_json};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1000,
        }
    }
}

/// Simulation driver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset (particle budget)
    pub quality: QualityPreset,
    /// Particle effects on/off
    pub particles: bool,
    /// Simulation rate in ticks per second
    pub tick_hz: u32,
    /// Maximum ticks the driver runs per frame
    pub max_substeps: u32,
    /// Run seed; `None` lets the caller pick one
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            tick_hz: TICK_HZ,
            max_substeps: MAX_SUBSTEPS,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Duration of one tick in seconds
    pub fn tick_secs(&self) -> f32 {
        1.0 / self.tick_hz as f32
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings: Self = read_json(path)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::invalid("tick_hz", "must be > 0"));
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::invalid("max_substeps", "must be > 0"));
        }
        Ok(())
    }
}
