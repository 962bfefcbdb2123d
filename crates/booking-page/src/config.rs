//! Page configuration, read from a TOML file.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000/api"
//! timeout_secs = 10
//!
//! [site]
//! base_url = "http://localhost:3000"
//!
//! [viewer]
//! time_zone = "Europe/London"
//! hour_format = "24h"
//!
//! [[hosts]]
//! username = "alice"
//! name = "Alice Example"
//! timeZone = "America/New_York"
//! startTime = 540
//! endTime = 1020
//!
//! [[event_types]]
//! id = 1
//! title = "30 Minute Meeting"
//! length = 30
//! ```

use std::path::Path;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::{parse_zone, DateService, HourFormat};

use crate::error::ConfigError;
use crate::profile::{EventType, HostProfile, StaticProfiles};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageConfig {
    pub api: ApiConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub hosts: Vec<HostProfile>,
    #[serde(default)]
    pub event_types: Vec<EventType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    pub time_zone: String,
    #[serde(default)]
    pub hour_format: HourFormat,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            time_zone: "UTC".to_string(),
            hour_format: HourFormat::default(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PageConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!("Loading page config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be positive".to_string()));
        }
        self.viewer_zone()?;
        for host in &self.hosts {
            host.working_window().map_err(|e| {
                ConfigError::Invalid(format!("host '{}': {}", host.username, e))
            })?;
        }
        for event_type in &self.event_types {
            event_type.spec().map_err(|e| {
                ConfigError::Invalid(format!("event type {}: {}", event_type.id, e))
            })?;
        }
        Ok(())
    }

    pub fn viewer_zone(&self) -> Result<Tz, ConfigError> {
        parse_zone(&self.viewer.time_zone).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Date service on the system clock in the configured viewer zone.
    pub fn date_service(&self) -> Result<DateService, ConfigError> {
        Ok(DateService::system(self.viewer_zone()?))
    }

    pub fn profiles(&self) -> StaticProfiles {
        StaticProfiles::new(self.hosts.clone(), self.event_types.clone())
    }
}
