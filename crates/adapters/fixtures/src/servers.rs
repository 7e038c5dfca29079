//! Server list and per-server detail fixtures.
//!
//! Summaries and details are written out separately: the detail view carries
//! longer uptime and location strings than the list.

use std::net::{IpAddr, Ipv4Addr};

use fleetdash_domain::id::ServerId;
use fleetdash_domain::server::{
    HardwareSpecs, HostedService, IoMetrics, ServerDetail, ServerStatus, ServerSummary,
    ServiceState,
};

struct Row {
    id: u32,
    name: &'static str,
    status: ServerStatus,
    uptime: &'static str,
    cpu: u8,
    memory: u8,
    storage: u8,
    location: &'static str,
    host: u8,
}

impl Row {
    fn into_summary(self) -> ServerSummary {
        ServerSummary {
            id: ServerId::new(self.id),
            name: self.name.to_string(),
            status: self.status,
            uptime: self.uptime.to_string(),
            cpu: self.cpu,
            memory: self.memory,
            storage: self.storage,
            location: self.location.to_string(),
            ip: IpAddr::V4(Ipv4Addr::new(192, 168, 1, self.host)),
        }
    }
}

pub fn summaries() -> Vec<ServerSummary> {
    [
        Row {
            id: 1,
            name: "web-server-01",
            status: ServerStatus::Online,
            uptime: "15 days",
            cpu: 45,
            memory: 68,
            storage: 78,
            location: "US East",
            host: 10,
        },
        Row {
            id: 2,
            name: "db-server-02",
            status: ServerStatus::Online,
            uptime: "32 days",
            cpu: 23,
            memory: 82,
            storage: 65,
            location: "US West",
            host: 20,
        },
        Row {
            id: 3,
            name: "api-server-03",
            status: ServerStatus::Warning,
            uptime: "8 days",
            cpu: 89,
            memory: 76,
            storage: 45,
            location: "EU Central",
            host: 30,
        },
        Row {
            id: 4,
            name: "cache-server-04",
            status: ServerStatus::Offline,
            uptime: "0 days",
            cpu: 0,
            memory: 0,
            storage: 34,
            location: "Asia Pacific",
            host: 40,
        },
    ]
    .into_iter()
    .map(Row::into_summary)
    .collect()
}

pub fn details() -> Vec<ServerDetail> {
    vec![
        ServerDetail {
            summary: Row {
                id: 1,
                name: "web-server-01",
                status: ServerStatus::Online,
                uptime: "15 days, 4 hours",
                cpu: 45,
                memory: 68,
                storage: 78,
                location: "US East (Virginia)",
                host: 10,
            }
            .into_summary(),
            os: "Ubuntu 22.04 LTS".to_string(),
            specs: specs(4, "16 GB", "500 GB SSD"),
            metrics: io("125 MB/s", "89 MB/s", "45 MB/s", "23 MB/s"),
            services: vec![
                running("nginx", 80),
                running("nodejs", 3000),
                running("redis", 6379),
            ],
        },
        ServerDetail {
            summary: Row {
                id: 2,
                name: "db-server-02",
                status: ServerStatus::Online,
                uptime: "32 days, 12 hours",
                cpu: 23,
                memory: 82,
                storage: 65,
                location: "US West (Oregon)",
                host: 20,
            }
            .into_summary(),
            os: "CentOS 8".to_string(),
            specs: specs(8, "32 GB", "1 TB SSD"),
            metrics: io("67 MB/s", "34 MB/s", "156 MB/s", "89 MB/s"),
            services: vec![running("postgresql", 5432), running("pgbouncer", 6432)],
        },
    ]
}

fn specs(cores: u16, ram: &str, disk: &str) -> HardwareSpecs {
    HardwareSpecs {
        cores,
        ram: ram.to_string(),
        disk: disk.to_string(),
    }
}

fn io(network_in: &str, network_out: &str, disk_read: &str, disk_write: &str) -> IoMetrics {
    IoMetrics {
        network_in: network_in.to_string(),
        network_out: network_out.to_string(),
        disk_read: disk_read.to_string(),
        disk_write: disk_write.to_string(),
    }
}

fn running(name: &str, port: u16) -> HostedService {
    HostedService {
        name: name.to_string(),
        status: ServiceState::Running,
        port,
    }
}
