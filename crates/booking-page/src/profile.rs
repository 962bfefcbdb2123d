//! Host and event type profiles, and the lookup service that provides them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use slot_engine::{parse_zone, EventSpec, WorkingWindow};

use crate::error::ProfileError;

/// Public profile of the host whose page is being viewed.
///
/// `start_time`/`end_time` are minutes since midnight in `time_zone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostProfile {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub time_zone: String,
    pub start_time: u32,
    pub end_time: u32,
}

impl HostProfile {
    pub fn working_window(&self) -> Result<WorkingWindow, ProfileError> {
        let zone = parse_zone(&self.time_zone)?;
        Ok(WorkingWindow::from_minutes(
            self.start_time,
            self.end_time,
            zone,
        )?)
    }

    /// Name to show, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Length in minutes.
    pub length: i64,
}

impl EventType {
    pub fn spec(&self) -> Result<EventSpec, ProfileError> {
        Ok(EventSpec::new(self.length)?)
    }
}

/// Looks up hosts by username and event types by id.
#[async_trait]
pub trait ProfileSource {
    async fn host(&self, username: &str) -> Result<HostProfile, ProfileError>;

    async fn event_type(&self, id: i64) -> Result<EventType, ProfileError>;
}

/// Profiles held in memory, typically loaded from the config file.
#[derive(Debug, Clone, Default)]
pub struct StaticProfiles {
    hosts: Vec<HostProfile>,
    event_types: Vec<EventType>,
}

impl StaticProfiles {
    pub fn new(hosts: Vec<HostProfile>, event_types: Vec<EventType>) -> Self {
        Self { hosts, event_types }
    }
}

#[async_trait]
impl ProfileSource for StaticProfiles {
    async fn host(&self, username: &str) -> Result<HostProfile, ProfileError> {
        self.hosts
            .iter()
            .find(|h| h.username == username)
            .cloned()
            .ok_or_else(|| ProfileError::UnknownUser(username.to_string()))
    }

    async fn event_type(&self, id: i64) -> Result<EventType, ProfileError> {
        self.event_types
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(ProfileError::UnknownEventType(id))
    }
}
