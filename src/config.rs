//! Serializable simulation configuration.
//!
//! A [`SimConfig`] bundles everything needed to start a run: domain geometry,
//! spawn distributions, the initial environment, trail settings and an
//! optional seed. It round-trips through JSON so runs can be saved and shared.

use crate::error::{ConfigError, Result};
use crate::params::{Domain, EnvironmentParams, InitParams};
use crate::simulation::SUBSTEPS;
use crate::trails::TrailConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_substeps() -> u32 {
    SUBSTEPS
}

/// Complete simulation configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    pub name: String,
    #[serde(default)]
    pub domain: Domain,
    #[serde(default)]
    pub init: InitParams,
    #[serde(default)]
    pub environment: EnvironmentParams,
    #[serde(default)]
    pub trails: TrailConfig,
    #[serde(default = "default_substeps")]
    pub substeps: u32,
    /// Seed for reproducible runs. `None` seeds from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".into(),
            domain: Domain::default(),
            init: InitParams::default(),
            environment: EnvironmentParams::default(),
            trails: TrailConfig::default(),
            substeps: SUBSTEPS,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    ///
    /// Live environment values are not checked; the operator may set them to
    /// anything at runtime.
    pub fn validate(&self) -> Result<()> {
        let d = &self.domain;
        if !(d.width > 0.0) || !(d.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "domain must have positive size, got {} x {}",
                d.width, d.height
            )));
        }
        if d.ground_level >= d.spawn_height {
            return Err(ConfigError::Invalid(format!(
                "ground level {} must be below spawn height {}",
                d.ground_level, d.spawn_height
            )));
        }
        if self.substeps == 0 {
            return Err(ConfigError::Invalid("substeps must be at least 1".into()));
        }
        let i = &self.init;
        for (name, var) in [
            ("mass_var", i.mass_var),
            ("diameter_var", i.diameter_var),
            ("theta_var", i.theta_var),
        ] {
            if var < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must not be negative, got {}",
                    name, var
                )));
            }
        }
        Ok(())
    }

    /// Look up a built-in preset by name.
    pub fn preset(name: &str) -> Result<Self> {
        match name {
            "calm" => Ok(Self::calm()),
            "gusty" => Ok(Self::gusty()),
            "storm" => Ok(Self::storm()),
            other => Err(ConfigError::UnknownPreset {
                name: other.to_string(),
                available: Self::preset_names().join(", "),
            }),
        }
    }

    /// Names accepted by [`preset`](Self::preset).
    pub fn preset_names() -> &'static [&'static str] {
        &["calm", "gusty", "storm"]
    }

    /// Light snowfall in still air.
    pub fn calm() -> Self {
        Self {
            name: "Calm".into(),
            environment: EnvironmentParams {
                wind_speed_top: 0.2,
                wind_speed_bottom: 0.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Strong shear between the top and bottom of the domain, with trails.
    pub fn gusty() -> Self {
        Self {
            name: "Gusty".into(),
            environment: EnvironmentParams {
                wind_speed_top: 4.0,
                wind_speed_bottom: -1.0,
                beam_angle: 40.0,
                ..Default::default()
            },
            trails: TrailConfig {
                enabled: true,
                capacity: 24,
            },
            ..Default::default()
        }
    }

    /// Dense population of small flakes in heavy wind and thin air.
    pub fn storm() -> Self {
        Self {
            name: "Storm".into(),
            init: InitParams {
                num_flakes: 1000,
                mass_mean: 1.5,
                mass_var: 0.2,
                diameter_mean: 3.0,
                diameter_var: 0.5,
                ..Default::default()
            },
            environment: EnvironmentParams {
                air_pressure: 0.8,
                wind_speed_top: 8.0,
                wind_speed_bottom: 2.0,
                ambient: 0.1,
                specular_strength: 0.8,
                specular_exponent: 32.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
