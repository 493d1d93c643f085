// SPDX-License-Identifier: GPL-3.0-only

//! Canonical entity models for the NAS management API client
//!
//! Every record here is a freestanding value: it is built once per refresh
//! cycle by `nas-client` and carries no reference back into the wire payload
//! or the transport that produced it.
//!
//! - `SystemInfo` → identity, resource gauges, RAID/volume/log lists
//! - `DiskInfo` → physical disk identity and health flags
//! - `SmartInfo` → SMART summary and attribute table for one disk
//! - `StorageUsage` → capacity summary across volumes

pub mod common;
pub mod disk;
pub mod system;

pub use common::{GIB, bytes_to_gib, bytes_to_pretty, ratio_percent};
pub use disk::{DiskInfo, SmartAttribute, SmartInfo};
pub use system::{LogEntry, RaidInfo, StorageUsage, SystemInfo, VolumeInfo};
