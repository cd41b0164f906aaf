//! Moderator preferences.
//!
//! `ModeratorConfig` carries the settings the presentation layer shows
//! (day length, dead-player filter, log export). The resolution engine
//! never reads it: it's passed explicitly to whatever renders the roster
//! and drives the external day timer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed day lengths in minutes.
pub const DAY_DURATION_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Errors from loading or validating a `ModeratorConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("day duration must be between {min} and {max} minutes (got {value})")]
    DayDurationOutOfRange { value: u8, min: u8, max: u8 },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Presentation-side preferences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeratorConfig {
    /// Length of a day phase, in minutes.
    pub day_duration_minutes: u8,

    /// Show dead players in the roster view.
    pub show_dead: bool,

    /// Keep a log of moderator actions.
    pub create_logs: bool,
}

impl Default for ModeratorConfig {
    fn default() -> Self {
        Self {
            day_duration_minutes: 2,
            show_dead: true,
            create_logs: false,
        }
    }
}

impl ModeratorConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the day length in minutes.
    #[must_use]
    pub fn with_day_duration(mut self, minutes: u8) -> Self {
        self.day_duration_minutes = minutes;
        self
    }

    /// Hide dead players from the roster view.
    #[must_use]
    pub fn hide_dead(mut self) -> Self {
        self.show_dead = false;
        self
    }

    /// Enable the moderator action log.
    #[must_use]
    pub fn with_logs(mut self) -> Self {
        self.create_logs = true;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !DAY_DURATION_RANGE.contains(&self.day_duration_minutes) {
            return Err(ConfigError::DayDurationOutOfRange {
                value: self.day_duration_minutes,
                min: *DAY_DURATION_RANGE.start(),
                max: *DAY_DURATION_RANGE.end(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Day length as a `Duration`, for the external timer.
    #[must_use]
    pub fn day_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.day_duration_minutes) * 60)
    }
}
