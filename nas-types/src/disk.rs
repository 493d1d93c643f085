// SPDX-License-Identifier: GPL-3.0-only

//! Disk and SMART data models
//!
//! These types are the canonical model for disk information regardless of
//! which API generation the appliance speaks.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::bytes_to_gib;

/// Information about one physical disk bay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiskInfo {
    // === Identity ===
    /// Device key used by every endpoint (e.g., "sda")
    pub id: String,

    /// Display name (legacy firmware reports "Disk 1"; newer firmware repeats the key)
    pub name: String,

    /// Vendor/manufacturer name
    pub vendor: String,

    /// Disk model name
    pub model: String,

    /// Serial number
    pub serial: String,

    /// Firmware revision
    pub revision: String,

    /// SCSI host/bus/target path
    pub scsi_path: String,

    /// Device path (e.g., "/dev/sda")
    pub device_path: String,

    // === Physical Properties ===
    /// Total size in bytes
    pub size_bytes: u64,

    /// Number of partitions on the disk
    pub partition_count: u32,

    /// Current temperature in Celsius
    pub temperature: i16,

    /// UUID of the RAID array this disk belongs to (empty if none)
    pub raid_uuid: String,

    /// Roaming state as reported by the appliance (e.g., "no")
    pub roaming: String,

    // === Flags ===
    pub connected: bool,
    pub removable: bool,
    pub healthy: bool,
    pub failed: bool,
    pub over_temp: bool,
    pub sleep: bool,
    pub allowed: bool,

    /// SMART summary, when any endpoint reported one
    pub smart: Option<SmartInfo>,
}

impl DiskInfo {
    /// Size in (binary) gigabytes, derived from `size_bytes`
    pub fn size_gb(&self) -> f64 {
        bytes_to_gib(self.size_bytes)
    }

    /// SMART result string, or "Unknown" when no SMART data is attached
    pub fn smart_status(&self) -> &str {
        self.smart
            .as_ref()
            .map(|smart| smart.result.as_str())
            .unwrap_or("Unknown")
    }

    /// Get a human-readable display name for the disk
    pub fn display_name(&self) -> String {
        if !self.model.is_empty() && self.model != "Unknown" {
            format!("{} ({})", self.model, self.id)
        } else {
            self.id.clone()
        }
    }
}

/// SMART summary for a disk
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SmartInfo {
    /// Clean result token (e.g., "Pass")
    pub result: String,

    /// Kind of the last self-test (e.g., "Short")
    pub test_type: String,

    /// Self-test progress as a fraction in 0.0..=1.0
    pub percent: f64,

    /// When the last self-test ran, if the appliance embedded a parseable timestamp
    pub last_test_date: Option<NaiveDateTime>,

    /// Attribute table, in the order the appliance listed it
    #[serde(default)]
    pub attributes: Vec<SmartAttribute>,
}

impl SmartInfo {
    pub fn passed(&self) -> bool {
        self.result.eq_ignore_ascii_case("pass")
    }

    pub fn attribute(&self, id: u16) -> Option<&SmartAttribute> {
        self.attributes.iter().find(|attr| attr.id == id)
    }
}

/// Individual SMART attribute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SmartAttribute {
    /// Attribute ID (1-255)
    pub id: u16,

    /// Attribute name (e.g., "Reallocated Sectors Count")
    pub name: String,

    /// Current normalized value
    pub value: u16,

    /// Worst value seen
    pub worst: u16,

    /// Failure threshold (when value <= threshold, attribute is failing)
    pub threshold: u16,
}

impl SmartAttribute {
    /// A zero threshold means the attribute is informational only
    pub fn failing(&self) -> bool {
        self.threshold > 0 && self.value <= self.threshold
    }
}
