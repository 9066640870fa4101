//! Configuration management for mindwell.
//!
//! This module handles loading and saving configuration from `~/.mindwell/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{AppointmentConfig, ColorSetting, Config, GeneralConfig, PracticeConfig};
