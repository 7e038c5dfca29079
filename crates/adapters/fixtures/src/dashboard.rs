//! Fleet-wide dashboard figures.

use fleetdash_domain::id::ActivityId;
use fleetdash_domain::metrics::{ActivityEntry, ActivityStatus, DashboardMetrics};

pub fn metrics() -> DashboardMetrics {
    DashboardMetrics {
        total_servers: 24,
        active_servers: 22,
        total_uptime: "99.8%".to_string(),
        total_storage: "2.4 TB".to_string(),
        used_storage: "1.8 TB".to_string(),
        monthly_bandwidth: "847 GB".to_string(),
        active_alerts: 3,
        cpu_usage: 68,
        memory_usage: 74,
        network_traffic: 156,
        recent_activity: vec![
            activity(
                1,
                "Server restart",
                "web-server-01",
                "2 minutes ago",
                ActivityStatus::Success,
            ),
            activity(
                2,
                "Backup completed",
                "db-server-02",
                "15 minutes ago",
                ActivityStatus::Success,
            ),
            activity(
                3,
                "High CPU usage alert",
                "api-server-03",
                "1 hour ago",
                ActivityStatus::Warning,
            ),
        ],
    }
}

fn activity(
    id: u32,
    action: &str,
    server: &str,
    timestamp: &str,
    status: ActivityStatus,
) -> ActivityEntry {
    ActivityEntry {
        id: ActivityId::new(id),
        action: action.to_string(),
        server: server.to_string(),
        timestamp: timestamp.to_string(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_list_most_recent_activity_first() {
        let metrics = metrics();
        assert_eq!(metrics.recent_activity[0].timestamp, "2 minutes ago");
        assert_eq!(metrics.recent_activity[2].status, ActivityStatus::Warning);
    }

    #[test]
    fn should_never_report_more_active_than_total_servers() {
        let metrics = metrics();
        assert!(metrics.active_servers <= metrics.total_servers);
    }
}
