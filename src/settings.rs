//! Host settings
//!
//! Read from a JSON file named by `IR_PONG_SETTINGS`, else `ir_pong.json`
//! in the working directory. The game core never sees these.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{MESSAGE_RATE, PACER_RATE};

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "IR_PONG_SETTINGS";
/// Settings file used when the variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "ir_pong.json";

/// Where the link socket listens and sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    pub bind: String,
    pub peer: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:47001".into(),
            peer: "127.0.0.1:47002".into(),
        }
    }
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scheduler ticks per second
    pub pacer_rate_hz: u32,
    /// Scrolling text speed, characters per second
    pub message_rate: u32,
    pub link: LinkSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pacer_rate_hz: PACER_RATE,
            message_rate: MESSAGE_RATE,
            link: LinkSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings JSON; absent fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Settings file path
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load from `path()`, falling back to defaults
    pub fn load() -> Self {
        let path = Self::path();
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Display refreshes per scrolled character
    pub fn ticks_per_char(&self) -> u32 {
        (self.pacer_rate_hz / self.message_rate.max(1)).max(1)
    }
}
