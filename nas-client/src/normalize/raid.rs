// SPDX-License-Identifier: GPL-3.0-only

use nas_types::RaidInfo;

use crate::error::Result;
use crate::extract::{get_int, get_str};
use crate::tree::Node;

/// One `raid` element of the status resource
pub fn normalize_raid(node: &Node) -> Result<RaidInfo> {
    Ok(RaidInfo {
        id: get_int(node, "id", 0)?,
        level: get_str(node, "level", ""),
        chunk_size: get_int(node, "chunk_size", 0)?,
        num_of_total_disks: get_int(node, "num_of_total_disks", 0)?,
        num_of_raid_disks: get_int(node, "num_of_raid_disks", 0)?,
        num_of_active_disks: get_int(node, "num_of_active_disks", 0)?,
        num_of_working_disks: get_int(node, "num_of_working_disks", 0)?,
        num_of_spare_disks: get_int(node, "num_of_spare_disks", 0)?,
        num_of_failed_disks: get_int(node, "num_of_failed_disks", 0)?,
        raid_disks: get_str(node, "raid_disks", ""),
        spare_disks: get_str(node, "spare_disks", ""),
        failed_disks: get_str(node, "failed_disks", ""),
        rebuilding_disks: get_str(node, "rebuilding_disks", ""),
        size: get_int(node, "size", 0)?,
        used_size: get_int(node, "used_size", 0)?,
        min_req_size: get_int(node, "min_req_size", 0)?,
        state: get_str(node, "state", ""),
        state_detail: get_str(node, "state_detail", ""),
        uuid: get_str(node, "uuid", ""),
        dev: get_str(node, "dev", ""),
        ar: get_int(node, "ar", 0)?,
        expand_size: get_int(node, "expand_size", 0)?,
        expand_no_replace: get_int(node, "expand_no_replace", 0)?,
        migrate_from: get_str(node, "migrate_from", ""),
        migrate_to: get_str(node, "migrate_to", ""),
        recover_failed: get_int(node, "recover_failed", 0)?,
        reshape_failed: get_int(node, "reshape_failed", 0)?,
        dirty: get_int(node, "dirty", 0)?,
    })
}

pub fn normalize_raids(items: Vec<&Node>) -> Result<Vec<RaidInfo>> {
    items.into_iter().map(normalize_raid).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NasError;
    use crate::extract::get_list;
    use crate::tree::{Format, decode};

    #[test]
    fn full_raid_record() {
        let tree = decode(
            r#"<config><raids><raid>
                <id>1</id><level>raid1</level><chunk_size>64</chunk_size>
                <num_of_total_disks>2</num_of_total_disks><num_of_raid_disks>2</num_of_raid_disks>
                <num_of_active_disks>2</num_of_active_disks><num_of_working_disks>2</num_of_working_disks>
                <num_of_spare_disks>0</num_of_spare_disks><num_of_failed_disks>0</num_of_failed_disks>
                <raid_disks>sda2,sdb2</raid_disks><spare_disks/><failed_disks/><rebuilding_disks/>
                <size>3902352384</size><used_size>1024</used_size><min_req_size>0</min_req_size>
                <state>clean</state><state_detail>clean</state_detail>
                <uuid>9a2c1f5e:77e0b1c3</uuid><dev>/dev/md1</dev>
                <ar>0</ar><expand_size>0</expand_size><expand_no_replace>0</expand_no_replace>
                <migrate_from/><migrate_to/><recover_failed>0</recover_failed>
                <reshape_failed>0</reshape_failed><dirty>0</dirty>
            </raid></raids></config>"#,
            Format::Xml,
        )
        .unwrap();

        let raids = normalize_raids(get_list(&tree, "raids/raid")).unwrap();
        assert_eq!(raids.len(), 1);
        let raid = &raids[0];
        assert_eq!(raid.id, 1);
        assert_eq!(raid.level, "raid1");
        assert_eq!(raid.size, 3_902_352_384);
        assert_eq!(raid.member_disks(), vec!["sda2", "sdb2"]);
        assert_eq!(raid.spare_disks, "");
        assert!(!raid.is_degraded());
    }

    #[test]
    fn sparse_raid_defaults_and_bad_numbers_raise() {
        let sparse = decode(r#"{"id": "2", "level": "jbod"}"#, Format::Json).unwrap();
        let raid = normalize_raid(&sparse).unwrap();
        assert_eq!(raid.id, 2);
        assert_eq!(raid.chunk_size, 0);
        assert_eq!(raid.state, "");

        let bad = decode(r#"{"id": "2", "size": "big"}"#, Format::Json).unwrap();
        assert!(matches!(normalize_raid(&bad), Err(NasError::Coercion { .. })));
    }
}
