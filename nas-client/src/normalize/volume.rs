// SPDX-License-Identifier: GPL-3.0-only

use nas_types::VolumeInfo;

use crate::error::Result;
use crate::extract::{get, get_bool, get_int, get_list, get_str};
use crate::tree::Node;

/// Source shapes of the volume list
#[derive(Debug, Clone, Copy)]
pub enum VolumePayload<'a> {
    /// `home_mgr.cgi cmd=2`: `volume` elements with a `vol_N` id attribute
    Legacy { home: &'a Node },
    /// `status_mgr.cgi cmd=resource`: `config/vols/vol`
    PerEndpoint { status: &'a Node },
}

pub fn normalize_volumes(payload: VolumePayload<'_>) -> Result<Vec<VolumeInfo>> {
    match payload {
        VolumePayload::Legacy { home } => {
            let mut items = get_list(home, "volume");
            if items.is_empty() {
                items = get_list(home, "volumes/volume");
            }
            items.into_iter().map(legacy_volume).collect()
        }
        VolumePayload::PerEndpoint { status } => get_list(status, "config/vols/vol")
            .into_iter()
            .map(status_volume)
            .collect(),
    }
}

fn legacy_volume(node: &Node) -> Result<VolumeInfo> {
    let name = get_str(node, "id", "");
    let id = name
        .rsplit_once('_')
        .and_then(|(_, num)| num.parse().ok())
        .unwrap_or(0);

    let size: u64 = get_int(node, "capacity", 0)?;
    // Some firmware reports free space instead of used.
    let used_size = match get(node, "used") {
        Some(_) => get_int(node, "used", 0)?,
        None => size.saturating_sub(get_int(node, "free", size)?),
    };

    Ok(VolumeInfo {
        id,
        label: get_str(node, "label", &name),
        name,
        mount_point: get_str(node, "mount_point", ""),
        device_path: get_str(node, "dev", ""),
        size,
        used_size,
        raid_level: get_str(node, "raid_level", ""),
        state: get_str(node, "state", ""),
        ..VolumeInfo::default()
    })
}

fn status_volume(node: &Node) -> Result<VolumeInfo> {
    Ok(VolumeInfo {
        id: get_int(node, "num", 0)?,
        name: get_str(node, "name", ""),
        label: get_str(node, "label", ""),
        mount_point: get_str(node, "mount_point", ""),
        encrypted: get_bool(node, "encrypted", false)?,
        device_path: get_str(node, "device_path", ""),
        unlocked: get_bool(node, "unlocked", false)?,
        mounted: get_bool(node, "mounted", false)?,
        size: get_int(node, "size", 0)?,
        uuid: get_str(node, "uuid", ""),
        roaming: get_bool(node, "roaming", false)?,
        used_size: get_int(node, "used_size", 0)?,
        raid_level: get_str(node, "raid_level", ""),
        raid_state: get_str(node, "raid_state", ""),
        raid_state_detail: get_str(node, "raid_state_detail", ""),
        state: get_str(node, "state", ""),
    })
}
