//! Configuration file support for vrscriber.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/vrscriber/config.toml`. Settings include handedness, dispatcher
//! thresholds, modal timing, haptics, study presentation and the model catalog.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ControllerType, Handedness};
pub use types::{
    HandsConfig, HapticsConfig, InteractionConfig, MirrorPlaneConfig, ModalConfig, ModelConfig,
    StudyConfig,
};

use crate::device::HapticPulse;
use crate::input::ModalTimings;
use crate::sketch::{Plane, SketchModel};
use anyhow::{Context, Result};
use glam::Vec3;
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [hands]
/// handedness = "left"
/// controller_type = "oculus"
///
/// [interaction]
/// draw_threshold = 0.1
/// idle_record_interval_secs = 2.0
///
/// [modal]
/// debounce_secs = 0.5
///
/// [models.chair]
/// display_name = "Chair"
/// mirror = { normal = [1.0, 0.0, 0.0] }
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Handedness and controller hardware
    #[serde(default)]
    pub hands: HandsConfig,

    /// Dispatcher thresholds
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Modal workflow timing
    #[serde(default)]
    pub modal: ModalConfig,

    /// Haptic pulse settings
    #[serde(default)]
    pub haptics: HapticsConfig,

    /// Study presentation
    #[serde(default)]
    pub study: StudyConfig,

    /// Reference model catalog keyed by model name
    #[serde(default)]
    pub models: BTreeMap<String, ModelConfig>,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `draw_threshold`: 0.01 - 0.9
    /// - `cancel_threshold`: 0.1 - 1.0
    /// - `idle_record_interval_secs`: 0.1 - 60.0
    /// - `debounce_secs`: 0.0 - 5.0
    /// - haptic amplitudes: 0.0 - 1.0, durations: 0.0 - 5.0
    /// - `origin_grid_step`: 0.01 - 1.0
    fn validate_and_clamp(&mut self) {
        clamp_field(
            "draw_threshold",
            &mut self.interaction.draw_threshold,
            0.01,
            0.9,
        );
        clamp_field(
            "cancel_threshold",
            &mut self.interaction.cancel_threshold,
            0.1,
            1.0,
        );
        clamp_field(
            "idle_record_interval_secs",
            &mut self.interaction.idle_record_interval_secs,
            0.1,
            60.0,
        );
        clamp_field("debounce_secs", &mut self.modal.debounce_secs, 0.0, 5.0);
        clamp_field(
            "action_amplitude",
            &mut self.haptics.action_amplitude,
            0.0,
            1.0,
        );
        clamp_field(
            "action_duration_secs",
            &mut self.haptics.action_duration_secs,
            0.0,
            5.0,
        );
        clamp_field(
            "system_switch_amplitude",
            &mut self.haptics.system_switch_amplitude,
            0.0,
            1.0,
        );
        clamp_field(
            "system_switch_duration_secs",
            &mut self.haptics.system_switch_duration_secs,
            0.0,
            5.0,
        );
        clamp_field(
            "origin_grid_step",
            &mut self.study.origin_grid_step,
            0.01,
            1.0,
        );

        // A zero normal cannot define a plane
        for (name, model) in &mut self.models {
            let degenerate = model
                .mirror
                .as_ref()
                .is_some_and(|m| Vec3::from_array(m.normal).length_squared() < 1e-8);
            if degenerate {
                log::warn!("Model '{name}' has a zero mirror normal, disabling mirroring for it");
                model.mirror = None;
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/vrscriber/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("vrscriber");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    pub fn modal_timings(&self) -> ModalTimings {
        ModalTimings {
            debounce: Duration::from_secs_f32(self.modal.debounce_secs),
            cancel_threshold: self.interaction.cancel_threshold,
        }
    }

    pub fn idle_record_interval(&self) -> Duration {
        Duration::from_secs_f32(self.interaction.idle_record_interval_secs)
    }

    pub fn action_pulse(&self) -> HapticPulse {
        HapticPulse::new(
            self.haptics.action_amplitude,
            Duration::from_secs_f32(self.haptics.action_duration_secs),
        )
    }

    pub fn system_switch_pulse(&self) -> HapticPulse {
        HapticPulse::new(
            self.haptics.system_switch_amplitude,
            Duration::from_secs_f32(self.haptics.system_switch_duration_secs),
        )
    }

    /// Mirror plane of `model` relative to the scene origin, if it has one.
    pub fn mirror_plane(&self, model: &SketchModel) -> Option<Plane> {
        let mirror = self.models.get(model.name())?.mirror.as_ref()?;
        Some(Plane {
            normal: Vec3::from_array(mirror.normal).normalize(),
            point: Vec3::from_array(mirror.point),
        })
    }

    /// Human-readable model name for instructions.
    pub fn model_display_name(&self, model: &SketchModel) -> String {
        self.models
            .get(model.name())
            .and_then(|m| m.display_name.clone())
            .unwrap_or_else(|| model.name().to_string())
    }
}

fn clamp_field(name: &str, value: &mut f32, min: f32, max: f32) {
    if !(min..=max).contains(&*value) {
        log::warn!(
            "Invalid {name} {:.3}, clamping to {min}-{max} range",
            *value
        );
        *value = if value.is_nan() {
            min
        } else {
            value.clamp(min, max)
        };
    }
}
