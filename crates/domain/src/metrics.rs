//! Fleet-wide dashboard metrics and the recent activity feed.

use serde::{Deserialize, Serialize};

use crate::id::ActivityId;

/// Outcome of a recent activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Success,
    Warning,
    Error,
}

/// One line of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: ActivityId,
    pub action: String,
    pub server: String,
    /// Relative, human-formatted time (e.g. `"2 minutes ago"`).
    pub timestamp: String,
    pub status: ActivityStatus,
}

/// Aggregate figures shown on the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_servers: u32,
    pub active_servers: u32,
    pub total_uptime: String,
    pub total_storage: String,
    pub used_storage: String,
    pub monthly_bandwidth: String,
    pub active_alerts: u32,
    /// Fleet CPU usage, percent.
    pub cpu_usage: u8,
    /// Fleet memory usage, percent.
    pub memory_usage: u8,
    /// Network traffic, Mbps.
    pub network_traffic: u32,
    pub recent_activity: Vec<ActivityEntry>,
}

impl DashboardMetrics {
    /// Servers that are not currently active.
    #[must_use]
    pub fn inactive_servers(&self) -> u32 {
        self.total_servers.saturating_sub(self.active_servers)
    }
}
