//! Server records: the fleet as seen by the console.
//!
//! Records are read-only snapshots; nothing in the console mutates them.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::id::ServerId;

/// Health of a server as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    Warning,
    Offline,
}

impl ServerStatus {
    /// Whether the server is reachable (anything but [`Offline`](Self::Offline)).
    #[must_use]
    pub fn is_reachable(self) -> bool {
        !matches!(self, Self::Offline)
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => f.pad("online"),
            Self::Warning => f.pad("warning"),
            Self::Offline => f.pad("offline"),
        }
    }
}

/// One row of the server list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    pub id: ServerId,
    pub name: String,
    pub status: ServerStatus,
    pub uptime: String,
    /// CPU usage, percent.
    pub cpu: u8,
    /// Memory usage, percent.
    pub memory: u8,
    /// Storage usage, percent.
    pub storage: u8,
    pub location: String,
    pub ip: IpAddr,
}

/// Hardware sizing of a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareSpecs {
    pub cores: u16,
    pub ram: String,
    pub disk: String,
}

/// Throughput figures, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IoMetrics {
    pub network_in: String,
    pub network_out: String,
    pub disk_read: String,
    pub disk_write: String,
}

/// Run state of a hosted service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Running,
    Stopped,
}

/// A service hosted on a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedService {
    pub name: String,
    pub status: ServiceState,
    pub port: u16,
}

/// Extended view of a single server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDetail {
    #[serde(flatten)]
    pub summary: ServerSummary,
    pub os: String,
    pub specs: HardwareSpecs,
    pub metrics: IoMetrics,
    pub services: Vec<HostedService>,
}

/// Control actions that can be requested for a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerAction {
    Restart,
    Stop,
    Start,
}

impl ServerAction {
    /// Acknowledgement text for this action on `id`.
    #[must_use]
    pub fn acknowledgement(self, id: ServerId) -> String {
        match self {
            Self::Restart => format!("Server {id} restart initiated"),
            Self::Stop => format!("Server {id} stopped successfully"),
            Self::Start => format!("Server {id} started successfully"),
        }
    }
}
