//! Configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ports::DriverOptions;

/// What to do when the completion marker cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoragePolicy {
    /// Log a warning and do not offer the tour. The user's choice could not be
    /// remembered, so offering it would repeat on every page load.
    #[default]
    Suppress,
    /// Log a warning and treat the marker as absent.
    TreatAsAbsent,
}

impl std::str::FromStr for StoragePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "suppress" => Ok(Self::Suppress),
            "treat_as_absent" => Ok(Self::TreatAsAbsent),
            other => Err(ConfigError::InvalidValue {
                key: "storage_policy".to_string(),
                message: format!("unknown policy {other:?}"),
            }),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tour controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    /// Storage key of the completion marker.
    pub storage_key: String,
    /// Paths recognized as the home entry point (exact match).
    pub home_paths: Vec<String>,
    /// Where `restart()` sends the browser from any other page.
    pub home_redirect: String,
    /// Pause between document ready and the welcome prompt.
    #[serde(rename = "settle_delay_ms", with = "millis")]
    pub settle_delay: Duration,
    /// How long the completion toast stays up.
    #[serde(rename = "notice_duration_ms", with = "millis")]
    pub notice_duration: Duration,
    pub storage_policy: StoragePolicy,
    pub driver: DriverOptions,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            storage_key: "cvgenerator_tour_completed".to_string(),
            home_paths: vec!["/".to_string(), "/index".to_string()],
            home_redirect: "/".to_string(),
            settle_delay: Duration::from_millis(800),
            notice_duration: Duration::from_millis(5000),
            storage_policy: StoragePolicy::default(),
            driver: DriverOptions::default(),
        }
    }
}

impl TourConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Defaults overlaid with `CVTOUR_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup (`CVTOUR_STORAGE_KEY`,
    /// `CVTOUR_SETTLE_DELAY_MS`, `CVTOUR_STORAGE_POLICY`).
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(key) = lookup("CVTOUR_STORAGE_KEY") {
            self.storage_key = key;
        }
        if let Some(raw) = lookup("CVTOUR_SETTLE_DELAY_MS") {
            let ms: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CVTOUR_SETTLE_DELAY_MS".to_string(),
                message: format!("not a number of milliseconds: {raw:?}"),
            })?;
            self.settle_delay = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup("CVTOUR_STORAGE_POLICY") {
            self.storage_policy = raw.parse()?;
        }
        Ok(self)
    }

    pub fn is_home(&self, path: &str) -> bool {
        self.home_paths.iter().any(|p| p == path)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
