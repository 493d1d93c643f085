// SPDX-License-Identifier: GPL-3.0-only

//! Disk identities and their join with per-disk SMART summaries

use nas_types::{DiskInfo, SmartInfo};
use tracing::warn;

use super::smart::{SmartSummary, smart_header};
use crate::error::{NasError, Result};
use crate::extract;
use crate::tree::Node;

/// Source shapes of the disk identity list
#[derive(Debug, Clone, Copy)]
pub enum DiskPayload<'a> {
    /// `home_mgr.cgi cmd=2`: `disks/disk` keyed by the `id` attribute
    Legacy { home: &'a Node },
    /// `sysinfo.xml`: `config/disks/disk` keyed by `name`
    PerEndpoint { sysinfo: &'a Node },
}

/// Field names that differ between the two identity shapes
struct DiskFields {
    key: &'static str,
    name: &'static str,
    serial: &'static str,
    temperature: &'static str,
    revision: &'static str,
    device_path: &'static str,
    partition_count: &'static str,
    test_type: &'static str,
    percent: Option<&'static str>,
}

const LEGACY_FIELDS: DiskFields = DiskFields {
    key: "id",
    name: "name",
    serial: "sn",
    temperature: "temp",
    revision: "rev",
    device_path: "dev",
    partition_count: "part_cnt",
    test_type: "test",
    percent: Some("percent"),
};

const PER_ENDPOINT_FIELDS: DiskFields = DiskFields {
    key: "name",
    name: "name",
    serial: "serial",
    temperature: "temperature",
    revision: "revision",
    device_path: "device_path",
    partition_count: "partition_count",
    test_type: "test_type",
    percent: None,
};

/// Build every disk identity the payload lists, in payload order
pub fn normalize_disks(payload: DiskPayload<'_>) -> Result<Vec<DiskInfo>> {
    let (items, fields) = match payload {
        DiskPayload::Legacy { home } => {
            let mut items = extract::get_list(home, "disks/disk");
            if items.is_empty() {
                items = extract::get_list(home, "disk");
            }
            (items, &LEGACY_FIELDS)
        }
        DiskPayload::PerEndpoint { sysinfo } => {
            (extract::get_list(sysinfo, "config/disks/disk"), &PER_ENDPOINT_FIELDS)
        }
    };

    if items.is_empty() {
        warn!("No disks found in disk identity payload");
    }

    items
        .into_iter()
        .map(|item| build_disk(item, fields))
        .collect()
}

fn build_disk(node: &Node, fields: &DiskFields) -> Result<DiskInfo> {
    let smart = match extract::get(node, "smart") {
        Some(smart @ Node::Mapping(_)) => Some(smart_header(smart, fields.test_type, fields.percent)?),
        _ => None,
    };

    Ok(DiskInfo {
        id: extract::require_str(node, fields.key)?,
        name: extract::get_str(node, fields.name, "Unknown"),
        vendor: extract::get_str(node, "vendor", "Unknown"),
        model: extract::get_str(node, "model", "Unknown"),
        serial: extract::require_str(node, fields.serial)?,
        revision: extract::get_str(node, fields.revision, ""),
        scsi_path: extract::get_str(node, "scsi_path", ""),
        device_path: extract::get_str(node, fields.device_path, ""),
        size_bytes: extract::get_int(node, "size", 0)?,
        partition_count: extract::get_int(node, fields.partition_count, 0)?,
        temperature: extract::get_int(node, fields.temperature, 0)?,
        raid_uuid: extract::get_str(node, "raid_uuid", ""),
        roaming: extract::get_str(node, "roaming", ""),
        connected: extract::get_bool(node, "connected", false)?,
        removable: extract::get_bool(node, "removable", false)?,
        healthy: extract::get_bool(node, "healthy", false)?,
        failed: extract::get_bool(node, "failed", false)?,
        over_temp: extract::get_bool(node, "over_temp", false)?,
        sleep: extract::get_bool(node, "sleep", false)?,
        allowed: extract::get_bool(node, "allowed", false)?,
        smart,
    })
}

/// Attach SMART summaries to the disks they are keyed by.
///
/// A summary whose key names no disk is an error; disks without a summary
/// keep the header found on their identity record.
pub fn join_smart_summaries<I>(mut disks: Vec<DiskInfo>, summaries: I) -> Result<Vec<DiskInfo>>
where
    I: IntoIterator<Item = (String, SmartSummary)>,
{
    for (key, summary) in summaries {
        let disk = disks
            .iter_mut()
            .find(|disk| disk.id == key)
            .ok_or_else(|| {
                NasError::NotFound(format!("disk `{key}` has SMART data but no identity record"))
            })?;

        let smart = disk.smart.get_or_insert_with(|| SmartInfo {
            result: "Unknown".to_string(),
            test_type: "unknown".to_string(),
            ..SmartInfo::default()
        });
        if let Some(percent) = summary.percent {
            smart.percent = percent;
        }
        smart.attributes = summary.attributes;
    }

    Ok(disks)
}
