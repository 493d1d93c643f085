// SPDX-License-Identifier: GPL-3.0-only

//! System, RAID, volume and log models

use serde::{Deserialize, Serialize};

use crate::common::{bytes_to_gib, ratio_percent};

/// Whole-appliance snapshot assembled from one refresh cycle
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SystemInfo {
    // === Identity ===
    pub serial_number: String,
    pub name: String,
    pub model: String,
    pub workgroup: String,
    pub description: String,
    pub firmware_version: String,
    /// Front-panel display firmware version
    pub oled: String,

    // === Gauges ===
    /// Fan speed in RPM
    pub fan_speed: u32,
    pub lan_r_speed: u32,
    pub lan_t_speed: u32,
    pub lan2_r_speed: u32,
    pub lan2_t_speed: u32,

    /// Memory figures in bytes
    pub memory_total: u64,
    pub memory_free: u64,
    pub memory_buffers: u64,
    pub memory_cached: u64,

    /// CPU load as a fraction in 0.0..=1.0
    pub cpu_usage: f64,

    pub uptime_seconds: u64,

    /// Enclosure temperature in Celsius
    pub temperature: i16,

    pub raids: Vec<RaidInfo>,
    pub volumes: Vec<VolumeInfo>,
    pub logs: Vec<LogEntry>,
}

impl SystemInfo {
    pub fn memory_used(&self) -> u64 {
        self.memory_total.saturating_sub(self.memory_free)
    }

    /// Memory usage percentage (0-100); 0 when the total is unknown
    pub fn memory_usage_percent(&self) -> f64 {
        ratio_percent(self.memory_used(), self.memory_total)
    }
}

/// RAID array metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RaidInfo {
    pub id: u32,
    pub level: String,
    pub chunk_size: u64,
    pub num_of_total_disks: u32,
    pub num_of_raid_disks: u32,
    pub num_of_active_disks: u32,
    pub num_of_working_disks: u32,
    pub num_of_spare_disks: u32,
    pub num_of_failed_disks: u32,
    /// Comma-separated member device keys
    pub raid_disks: String,
    pub spare_disks: String,
    pub failed_disks: String,
    pub rebuilding_disks: String,
    pub size: u64,
    pub used_size: u64,
    pub min_req_size: u64,
    pub state: String,
    pub state_detail: String,
    pub uuid: String,
    pub dev: String,
    /// Auto-rebuild flag
    pub ar: u32,
    pub expand_size: u64,
    pub expand_no_replace: u32,
    pub migrate_from: String,
    pub migrate_to: String,
    pub recover_failed: u32,
    pub reshape_failed: u32,
    pub dirty: u32,
}

impl RaidInfo {
    /// Member device keys parsed from `raid_disks`
    pub fn member_disks(&self) -> Vec<&str> {
        split_disk_list(&self.raid_disks)
    }

    pub fn is_degraded(&self) -> bool {
        self.num_of_failed_disks > 0 || self.num_of_working_disks < self.num_of_raid_disks
    }
}

fn split_disk_list(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Mounted logical storage unit
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeInfo {
    pub id: u32,
    pub name: String,
    pub label: String,
    pub mount_point: String,
    pub encrypted: bool,
    pub device_path: String,
    pub unlocked: bool,
    pub mounted: bool,
    /// Capacity in bytes
    pub size: u64,
    pub uuid: String,
    pub roaming: bool,
    /// Used space in bytes
    pub used_size: u64,
    pub raid_level: String,
    pub raid_state: String,
    pub raid_state_detail: String,
    pub state: String,
}

impl VolumeInfo {
    pub fn free_size(&self) -> u64 {
        self.size.saturating_sub(self.used_size)
    }
}

/// One row of the appliance's system log
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub service: String,
    pub message: String,
}

/// Capacity summary across all volumes, in binary gigabytes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageUsage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    /// 0-100
    pub usage_percent: f64,
}

impl StorageUsage {
    pub fn from_volumes(volumes: &[VolumeInfo]) -> Self {
        let total: u64 = volumes.iter().map(|vol| vol.size).sum();
        let used: u64 = volumes
            .iter()
            .map(|vol| vol.used_size.min(vol.size))
            .sum();
        let free = total.saturating_sub(used);

        Self {
            total_gb: bytes_to_gib(total),
            used_gb: bytes_to_gib(used),
            free_gb: bytes_to_gib(free),
            usage_percent: ratio_percent(used, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(total: u64, free: u64) -> SystemInfo {
        SystemInfo {
            memory_total: total,
            memory_free: free,
            ..SystemInfo::default()
        }
    }

    #[test]
    fn memory_usage_percent_property() {
        assert_eq!(memory(1000, 250).memory_usage_percent(), 75.0);
        assert_eq!(memory(0, 0).memory_usage_percent(), 0.0);
        assert_eq!(memory(1000, 1000).memory_usage_percent(), 0.0);
        assert_eq!(memory(1000, 0).memory_usage_percent(), 100.0);
    }

    #[test]
    fn memory_usage_percent_stays_bounded_on_inconsistent_free() {
        let info = memory(100, 400);
        assert_eq!(info.memory_used(), 0);
        assert_eq!(info.memory_usage_percent(), 0.0);
    }

    #[test]
    fn raid_members_and_degraded_state() {
        let raid = RaidInfo {
            raid_disks: "sda, sdb,".to_string(),
            num_of_raid_disks: 2,
            num_of_working_disks: 1,
            ..RaidInfo::default()
        };
        assert_eq!(raid.member_disks(), vec!["sda", "sdb"]);
        assert!(raid.is_degraded());

        let healthy = RaidInfo {
            num_of_working_disks: 2,
            ..raid
        };
        assert!(!healthy.is_degraded());
    }

    #[test]
    fn storage_usage_sums_volumes() {
        let gib = 1024 * 1024 * 1024;
        let volumes = vec![
            VolumeInfo {
                size: 4 * gib,
                used_size: gib,
                ..VolumeInfo::default()
            },
            VolumeInfo {
                size: 4 * gib,
                used_size: 3 * gib,
                ..VolumeInfo::default()
            },
        ];

        let usage = StorageUsage::from_volumes(&volumes);
        assert_eq!(usage.total_gb, 8.0);
        assert_eq!(usage.used_gb, 4.0);
        assert_eq!(usage.free_gb, 4.0);
        assert_eq!(usage.usage_percent, 50.0);
    }

    #[test]
    fn storage_usage_of_nothing_is_zero() {
        assert_eq!(StorageUsage::from_volumes(&[]), StorageUsage::default());
    }

    #[test]
    fn test_system_info_serialization() {
        let info = SystemInfo {
            serial_number: "WD-1234".to_string(),
            name: "MyNAS".to_string(),
            cpu_usage: 0.25,
            raids: vec![RaidInfo {
                id: 1,
                level: "raid1".to_string(),
                ..RaidInfo::default()
            }],
            logs: vec![LogEntry {
                timestamp: "2023/05/15 12:30:45".to_string(),
                level: "INFO".to_string(),
                service: "system".to_string(),
                message: "System started".to_string(),
            }],
            ..memory(1000, 250)
        };

        let json = serde_json::to_string(&info).unwrap();
        let deserialized: SystemInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info, deserialized);
    }
}
