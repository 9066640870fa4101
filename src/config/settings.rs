//! Configuration settings for mindwell.
//!
//! Settings are loaded from `~/.mindwell/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::MindwellError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Practice and timer settings.
    pub practice: PracticeConfig,
    /// Appointment slot settings.
    pub appointments: AppointmentConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Practice and timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PracticeConfig {
    /// Sessions per week counted as meeting the goal.
    #[serde(default = "default_weekly_goal")]
    pub weekly_goal_sessions: u32,
    /// Wall-clock milliseconds per timer tick.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Pattern used by `breathe` without an argument.
    #[serde(default = "default_pattern")]
    pub default_pattern: String,
}

/// Appointment slot settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppointmentConfig {
    /// First slot hour (inclusive).
    #[serde(default = "default_day_start")]
    pub day_start_hour: u32,
    /// Hour at which slots stop (exclusive).
    #[serde(default = "default_day_end")]
    pub day_end_hour: u32,
    /// Slot length in minutes.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// Days of slots to generate, starting today.
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
    /// Chance that a generated slot is bookable.
    #[serde(default = "default_availability")]
    pub availability: f64,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_weekly_goal() -> u32 {
    5
}

const fn default_tick_interval() -> u64 {
    1000
}

fn default_pattern() -> String {
    "4-7-8".to_string()
}

const fn default_day_start() -> u32 {
    9
}

const fn default_day_end() -> u32 {
    17
}

const fn default_slot_minutes() -> u32 {
    30
}

const fn default_days_ahead() -> u32 {
    7
}

const fn default_availability() -> f64 {
    0.7
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            weekly_goal_sessions: default_weekly_goal(),
            tick_interval_ms: default_tick_interval(),
            default_pattern: default_pattern(),
        }
    }
}

impl Default for AppointmentConfig {
    fn default() -> Self {
        Self {
            day_start_hour: default_day_start(),
            day_end_hour: default_day_end(),
            slot_minutes: default_slot_minutes(),
            days_ahead: default_days_ahead(),
            availability: default_availability(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds out-of-range values.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, MindwellError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            MindwellError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            MindwellError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges the rest of the app relies on.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::Config` describing the first bad value.
    pub fn validate(&self) -> Result<(), MindwellError> {
        let appt = &self.appointments;
        if appt.day_start_hour >= appt.day_end_hour || appt.day_end_hour > 24 {
            return Err(MindwellError::Config(format!(
                "appointment hours must satisfy start < end <= 24 (got {}..{})",
                appt.day_start_hour, appt.day_end_hour
            )));
        }
        if appt.slot_minutes == 0 || appt.slot_minutes > 60 || 60 % appt.slot_minutes != 0 {
            return Err(MindwellError::Config(format!(
                "slot_minutes must divide an hour (got {})",
                appt.slot_minutes
            )));
        }
        if !(0.0..=1.0).contains(&appt.availability) {
            return Err(MindwellError::Config(format!(
                "availability must be between 0 and 1 (got {})",
                appt.availability
            )));
        }
        if self.practice.tick_interval_ms == 0 {
            return Err(MindwellError::Config(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), MindwellError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| MindwellError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            MindwellError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
