//! System configuration parameters
//!
//! All tunable parameters for the PetFeeder controller.  Nothing here is
//! persisted at runtime: the firmware starts from [`FeederConfig::default`]
//! or from a JSON override baked in at build time.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::ConfigError;
use crate::time_of_day::TimeOfDay;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeederConfig {
    // --- Input ---
    /// Continuous high time required to accept a press (milliseconds)
    pub debounce_window_ms: u32,
    /// Debounce sampling timer period (milliseconds)
    pub debounce_sample_ms: u32,

    // --- Feeding ---
    /// Minimum time between two feeds (milliseconds)
    pub feed_refractory_ms: u32,
    /// How long the actuator is held active per feed (milliseconds)
    pub feed_hold_ms: u32,

    // --- Timing ---
    /// Sleep between idle-screen passes (milliseconds)
    pub idle_poll_ms: u32,
    /// Polling cadence while the menu is open (milliseconds)
    pub menu_poll_ms: u32,
    /// Status heartbeat interval (seconds)
    pub status_interval_secs: u32,

    // --- Editing ---
    /// Largest hour reachable in the hour editor before wrapping to 0
    pub hour_edit_max: u8,

    // --- Alarms ---
    /// Initial alarm times, slot 0 then slot 1
    pub alarm_times: [TimeOfDay; 2],
    /// Initial alarm enabled flags
    pub alarms_enabled: [bool; 2],
}

impl Default for FeederConfig {
    fn default() -> Self {
        Self {
            // Input
            debounce_window_ms: 20,
            debounce_sample_ms: 1,

            // Feeding
            feed_refractory_ms: 61_000, // one minute plus margin
            feed_hold_ms: 5_000,

            // Timing
            idle_poll_ms: 1_000,
            menu_poll_ms: 20,
            status_interval_secs: 60,

            // Editing
            hour_edit_max: 24,

            // Alarms
            alarm_times: [
                TimeOfDay::new(10, 30).unwrap_or(TimeOfDay::MIDNIGHT),
                TimeOfDay::new(20, 30).unwrap_or(TimeOfDay::MIDNIGHT),
            ],
            alarms_enabled: [false, false],
        }
    }
}

impl FeederConfig {
    /// Parse a JSON override document.  Missing fields take their defaults;
    /// the result is validated before it is returned.
    pub fn from_json(doc: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(doc).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply an optional override document, falling back to the defaults
    /// when it is absent or rejected.
    pub fn from_override(doc: Option<&str>) -> Self {
        let Some(doc) = doc else {
            return Self::default();
        };
        match Self::from_json(doc) {
            Ok(config) => {
                info!("Config: override applied");
                config
            }
            Err(e) => {
                warn!("Config: override ignored ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Reject values that would break the controller's invariants.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.debounce_sample_ms == 0 {
            return Err(ConfigError::ValidationFailed("debounce_sample_ms must be > 0"));
        }
        if self.debounce_window_ms < self.debounce_sample_ms {
            return Err(ConfigError::ValidationFailed(
                "debounce_window_ms shorter than one sample",
            ));
        }
        // An alarm matches for a whole minute; the guard must outlast it.
        if self.feed_refractory_ms <= 60_000 {
            return Err(ConfigError::ValidationFailed(
                "feed_refractory_ms must exceed one minute",
            ));
        }
        if self.feed_hold_ms == 0 || self.feed_hold_ms >= self.feed_refractory_ms {
            return Err(ConfigError::ValidationFailed("feed_hold_ms out of range"));
        }
        if self.menu_poll_ms == 0 || self.idle_poll_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll periods must be > 0"));
        }
        if !(23..=24).contains(&self.hour_edit_max) {
            return Err(ConfigError::ValidationFailed("hour_edit_max must be 23 or 24"));
        }
        Ok(())
    }

    /// Number of consecutive high samples that make a press.
    pub fn debounce_samples(&self) -> u32 {
        self.debounce_window_ms.div_ceil(self.debounce_sample_ms.max(1))
    }
}
